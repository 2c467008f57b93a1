use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*;
use std::process::Command; // Run programs
use tempfile;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

fn round_trip_test(test_data: &[u8]) -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = temp_dir.path().join("expanded");
    let cmp_path = temp_dir.path().join("compressed");
    let out_path = temp_dir.path().join("recovered");
    std::fs::write(&in_path,test_data)?;
    let mut cmd = Command::cargo_bin("huffpack")?;
    cmd.arg("compress")
        .arg("-i").arg(&in_path)
        .arg("-o").arg(&cmp_path)
        .assert()
        .success();
    let mut cmd = Command::cargo_bin("huffpack")?;
    cmd.arg("expand")
        .arg("-i").arg(&cmp_path)
        .arg("-o").arg(&out_path)
        .assert()
        .success();
    match (std::fs::read(&in_path),std::fs::read(&out_path)) {
        (Ok(v1),Ok(v2)) => {
            assert_eq!(v1,v2);
        },
        _ => panic!("unable to compare output with original")
    }
    Ok(())
}

#[test]
fn text_round_trip() -> STDRESULT {
    round_trip_test("I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes())
}

#[test]
fn binary_round_trip() -> STDRESULT {
    let test_data: Vec<u8> = (0u8..=255).cycle().take(4096).collect();
    round_trip_test(&test_data)
}

#[test]
fn single_byte_round_trip() -> STDRESULT {
    round_trip_test("a".as_bytes())
}

#[test]
fn empty_file_is_rejected() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = temp_dir.path().join("empty");
    let cmp_path = temp_dir.path().join("compressed");
    std::fs::write(&in_path,"")?;
    let mut cmd = Command::cargo_bin("huffpack")?;
    cmd.arg("compress")
        .arg("-i").arg(&in_path)
        .arg("-o").arg(&cmp_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("BadInput"));
    Ok(())
}
