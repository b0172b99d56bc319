use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use dcharvest::io::yearfile;
use dcharvest::pipelines::{Extraction, Pipeline};
use dcharvest::types::{Fields, YearCollection};

fn record(setspec: &str, date: &str, title: &str) -> String {
    format!(
        "<record><header><identifier>oai:x</identifier><setSpec>{setspec}</setSpec></header>\
         <metadata><oai_dc:dc><dc:title>{title}</dc:title><dc:date>{date}</dc:date>\
         <dc:creator>Doe, Jane</dc:creator><dc:language>eng</dc:language>\
         </oai_dc:dc></metadata></record>"
    )
}

/// SQL-like dump with duplicates across lines and a few broken records.
fn dump() -> String {
    let mut lines = vec![
        "-- dump header".to_string(),
        format!(
            "INSERT INTO records VALUES (1,'{}'),(2,'{}');",
            record("physics", "2019-03-01", "Quantum Foo"),
            record("physics", "2019", "Bar &amp; Baz")
        ),
        format!(
            "INSERT INTO records VALUES (3,'{}');",
            record("math", "2020-01-01", "Sets")
        ),
        // same article as on the first line
        format!(
            "INSERT INTO records VALUES (4,'{}');",
            record("physics", "2019-03-01", "Quantum Foo")
        ),
        "INSERT INTO records VALUES (5,'<record><setSpec>x</setSpec></record>');".to_string(),
        "INSERT INTO records VALUES (6,'<record><setSpec>x</setSpec><dc:date>n.d.</dc:date></record>');"
            .to_string(),
        "INSERT INTO records VALUES (7,'<record><dc:date>2019</dc:date></record>');".to_string(),
        "INSERT INTO records VALUES (8,'<record><setSpec>truncated".to_string(),
    ];
    lines.push(String::new());
    lines.join("\n")
}

fn run(dump: &str, dst: &Path) -> dcharvest::pipelines::ExtractionStats {
    let src = dst.join("database.sql");
    let mut f = std::fs::File::create(&src).unwrap();
    f.write_all(dump.as_bytes()).unwrap();

    Extraction::new(src, dst.join("json")).run().unwrap()
}

fn triples(dir: &Path) -> HashSet<(String, String, Fields)> {
    let mut ret = HashSet::new();
    for file in yearfile::list_year_files(&[dir.to_path_buf()]).unwrap() {
        let year = yearfile::year_of(&file).unwrap().to_string();
        let collection: YearCollection = yearfile::load(&file).unwrap();
        for (setspec, articles) in collection.iter() {
            for article in articles {
                ret.insert((year.clone(), setspec.to_string(), article.fields().clone()));
            }
        }
    }
    ret
}

#[test]
fn extract_dump() {
    let dir = tempfile::tempdir().unwrap();
    let stats = run(&dump(), dir.path());

    assert_eq!(stats.fragments, 7);
    assert_eq!(stats.rejected, 3);
    assert_eq!(stats.duplicates, 1);
    assert_eq!(
        stats.years,
        vec![("2019".to_string(), 2), ("2020".to_string(), 1)]
    );

    let json = dir.path().join("json");
    let y2019 = yearfile::load(&json.join("2019.json")).unwrap();
    let physics = y2019.get("physics").unwrap();
    assert_eq!(physics[0].fields().title, vec!["Quantum Foo"]);
    assert_eq!(physics[1].fields().title, vec!["Bar & Baz"]);
    assert_eq!(physics[0].fields().creator, vec!["Doe, Jane"]);
    assert_eq!(physics[0].fields().language, vec!["eng"]);
    assert!(physics[0].fields().rights.is_empty());
}

#[test]
fn extraction_is_idempotent() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    // the second dump repeats every line, in reverse order
    let once = dump();
    let mut reversed: Vec<&str> = once.lines().collect();
    reversed.reverse();
    let twice = format!("{}\n{}\n", once, reversed.join("\n"));

    run(&once, first.path());
    run(&twice, second.path());

    assert_eq!(
        triples(&first.path().join("json")),
        triples(&second.path().join("json"))
    );
}

#[test]
fn example_record() {
    let dir = tempfile::tempdir().unwrap();
    let dump = "<record><header><setSpec>physics</setSpec></header><metadata>\
                <dc:date>2019-03-01</dc:date><dc:title>Quantum Foo</dc:title></metadata></record>\n";
    run(dump, dir.path());

    let expected = Fields {
        date: vec!["2019-03-01".to_string()],
        title: vec!["Quantum Foo".to_string()],
        ..Default::default()
    };
    let found = triples(&dir.path().join("json"));
    assert_eq!(
        found,
        HashSet::from([("2019".to_string(), "physics".to_string(), expected)])
    );

    let raw = std::fs::read_to_string(dir.path().join("json").join("2019.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["physics"][0]["identifier"], serde_json::json!([]));
    assert_eq!(value["physics"][0]["date"], serde_json::json!(["2019-03-01"]));
}
