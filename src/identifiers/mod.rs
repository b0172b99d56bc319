/*! Language and field of study identification

Holds the [Predict] and [FosPredict] traits, and their implementations:
- [FastText] for language identification ([fasttext](https://fasttext.cc)),
- [FastTextFos] and [CommandFos] for field of study prediction.
!*/
mod command;
pub mod identification;
pub mod model;

pub use command::CommandFos;
pub use identification::{FosInput, FosOutput, FosPredict, Predict};
pub use model::{FastText, FastTextBuilder, FastTextFos};
