use super::*;

#[test]
fn read_error_mentions_the_path() {
    let error = ProgressError::Read {
        path: PathBuf::from("/tmp/progress.json"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
    };
    assert!(error.to_string().contains("/tmp/progress.json"));
}
