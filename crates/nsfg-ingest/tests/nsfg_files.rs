//! End-to-end loading of small NSFG-shaped fixtures from disk.

use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::Compression as GzLevel;
use flate2::write::GzEncoder;
use tempfile::TempDir;

use nsfg_ingest::{
    IngestError, PregnancySource, RespondentSource, make_preg_map, read_fem_preg, read_fem_resp,
    respondents_from_frame,
};
use nsfg_model::CaseId;

const RESP_DCT: &str = r#"infile dictionary {
    _column(1)      str12      caseid     %12s  "RESPONDENT ID NUMBER"
    _column(13)     byte     rscrinf      %1f  "WHETHER R IS SCREENER INFORMANT"
    _column(14)     byte      pregnum     %2f  "CAPI-BASED TOTAL NUMBER OF PREGNANCIES"
}
"#;

const PREG_DCT: &str = r#"infile dictionary {
    _column(1)      str12     caseid     %12s  "RESPONDENT ID NUMBER"
    _column(13)     byte     pregordr    %2f  "PREGNANCY ORDER (NUMBER)"
    _column(15)      int      agepreg    %4f  "AGE AT PREGNANCY OUTCOME"
    _column(19)     byte   birthwgt_lb   %2f  "BD-3 BIRTHWEIGHT IN POUNDS - 1ST BABY"
    _column(21)     byte   birthwgt_oz   %2f  "BD-3 BIRTHWEIGHT IN OUNCES - 1ST BABY"
}
"#;

// Fields are positional; a `\` continuation would eat the leading padding.
const RESP_DAT: &str = concat!(
    "           11 2\n",
    "           21 0\n",
    "           35 1\n",
);

const PREG_DAT: &str = concat!(
    "           1 1331613 6\n",
    "           1 2 900 8 4\n",
    "           3 11700\n",
);

fn write_gz(path: &Path, contents: &str) {
    let mut encoder = GzEncoder::new(Vec::new(), GzLevel::default());
    encoder.write_all(contents.as_bytes()).unwrap();
    fs::write(path, encoder.finish().unwrap()).unwrap();
}

fn fixture_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("2002FemResp.dct"), RESP_DCT).unwrap();
    fs::write(dir.path().join("2002FemPreg.dct"), PREG_DCT).unwrap();
    write_gz(&dir.path().join("2002FemResp.dat.gz"), RESP_DAT);
    write_gz(&dir.path().join("2002FemPreg.dat.gz"), PREG_DAT);
    dir
}

#[test]
fn loads_gzip_respondent_file() {
    let dir = fixture_dir();
    let resp = read_fem_resp(&RespondentSource::in_dir(dir.path())).unwrap();
    assert_eq!(resp.height(), 3);

    let respondents = respondents_from_frame(&resp).unwrap();
    let summary: Vec<(&str, u32)> = respondents
        .iter()
        .map(|r| (r.case_id.as_str(), r.pregnum))
        .collect();
    assert_eq!(summary, vec![("1", 2), ("2", 0), ("3", 1)]);
}

#[test]
fn nrows_limits_respondents() {
    let dir = fixture_dir();
    let source = RespondentSource::in_dir(dir.path()).with_nrows(Some(2));
    let resp = read_fem_resp(&source).unwrap();
    assert_eq!(resp.height(), 2);
}

#[test]
fn plain_and_gzip_files_read_the_same() {
    let dir = fixture_dir();
    let plain = dir.path().join("2002FemResp.dat");
    fs::write(&plain, RESP_DAT).unwrap();

    let gz = read_fem_resp(&RespondentSource::in_dir(dir.path())).unwrap();
    let source = RespondentSource {
        dat_file: plain,
        ..RespondentSource::in_dir(dir.path())
    };
    let txt = read_fem_resp(&source).unwrap();
    assert!(gz.equals_missing(&txt));
}

#[test]
fn pregnancy_file_is_cleaned_and_mapped() {
    let dir = fixture_dir();
    let preg = read_fem_preg(&PregnancySource::in_dir(dir.path())).unwrap();
    assert_eq!(preg.height(), 3);
    assert!(preg.column("totalwgt_lb").is_ok());

    let map = make_preg_map(&preg).unwrap();
    assert_eq!(map.get(&CaseId::new("1")).unwrap(), &[0, 1]);
    assert_eq!(map.get(&CaseId::new("3")).unwrap(), &[2]);
    assert!(map.get(&CaseId::new("2")).is_err());
}

#[test]
fn missing_data_file_is_reported() {
    let dir = fixture_dir();
    let source = RespondentSource {
        dat_file: dir.path().join("absent.dat.gz"),
        ..RespondentSource::in_dir(dir.path())
    };
    let err = read_fem_resp(&source).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn corrupt_gzip_is_a_read_error() {
    let dir = fixture_dir();
    fs::write(dir.path().join("2002FemResp.dat.gz"), b"not gzip").unwrap();
    let err = read_fem_resp(&RespondentSource::in_dir(dir.path())).unwrap_err();
    assert!(matches!(err, IngestError::FileRead { .. }));
}
