/*! Year file persistence.

Each year is stored as `<year>.json`, a pretty-printed [YearCollection].
Writes go to a sibling temporary file that is then renamed over the target,
so that an interrupted write never leaves a truncated year file behind.
!*/
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Error;
use crate::types::YearCollection;

/// Path of the year file for `year` in `dst`.
pub fn year_path(dst: &Path, year: &str) -> PathBuf {
    dst.join(format!("{year}.json"))
}

/// Year of a year file, taken from its file stem.
pub fn year_of(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|stem| stem.to_str())
}

pub fn load(path: &Path) -> Result<YearCollection, Error> {
    let reader = BufReader::new(File::open(path)?);
    let collection = serde_json::from_reader(reader)?;
    Ok(collection)
}

pub fn save(path: &Path, collection: &YearCollection) -> Result<(), Error> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    debug!("writing {} articles to {:?}", collection.len(), path);
    let mut writer = BufWriter::new(File::create(&tmp)?);
    serde_json::to_writer_pretty(&mut writer, collection)?;
    writer.flush()?;
    drop(writer);

    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Expands sources into year files.
///
/// Files are kept as is and in the provided order,
/// directories are replaced by their `*.json` files sorted by name.
pub fn list_year_files(sources: &[PathBuf]) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    for src in sources {
        if src.is_dir() {
            let pattern = src.join("*.json");
            let pattern = pattern
                .to_str()
                .ok_or_else(|| Error::Config(format!("non UTF-8 path: {:?}", src)))?;
            let mut found = glob::glob(pattern)?.collect::<Result<Vec<_>, _>>()?;
            found.sort();
            files.extend(found);
        } else {
            files.push(src.clone());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::types::{Article, Fields, YearCollection};

    use super::*;

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = year_path(dir.path(), "2019");

        let mut c = YearCollection::new();
        c.push(
            "physics".to_string(),
            Article::new(Fields {
                title: vec!["Quantum Foo".to_string(), "Second title".to_string()],
                date: vec!["2019-03-01".to_string()],
                ..Default::default()
            }),
        );
        c.push("math".to_string(), Article::default());

        save(&path, &c).unwrap();
        assert_eq!(load(&path).unwrap(), c);
        assert!(!dir.path().join("2019.json.tmp").exists());
    }

    #[test]
    fn save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = year_path(dir.path(), "2020");

        let mut c = YearCollection::new();
        c.push("a".to_string(), Article::default());
        save(&path, &c).unwrap();
        save(&path, &YearCollection::new()).unwrap();

        assert!(load(&path).unwrap().is_empty());
    }

    #[test]
    fn year_from_path() {
        assert_eq!(year_of(Path::new("data/json/2021.json")), Some("2021"));
    }

    #[test]
    fn list_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["2022.json", "2021.json", "notes.txt"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        let single = dir.path().join("2021.json");

        let files = list_year_files(&[single.clone(), dir.path().to_path_buf()]).unwrap();
        assert_eq!(
            files,
            vec![
                single.clone(),
                dir.path().join("2021.json"),
                dir.path().join("2022.json")
            ]
        );
    }
}
