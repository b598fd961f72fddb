//! Shared helpers for unit tests: a scriptable process runner and small
//! synthesized archives shaped like the real upstream artifacts.

use std::io::{self, Write};
use std::sync::Mutex;

use async_trait::async_trait;
use camino::Utf8Path;
use flate2::Compression;
use flate2::write::GzEncoder;

use crate::process::{ProcessRunner, RunRequest};

/// A runner that answers every request with the given function and records
/// what it was asked to run.
pub struct ScriptedRunner {
    on_run: Box<dyn Fn(&RunRequest) -> io::Result<i32> + Send + Sync>,
    requests: Mutex<Vec<RunRequest>>,
}

impl ScriptedRunner {
    pub fn new(on_run: impl Fn(&RunRequest) -> io::Result<i32> + Send + Sync + 'static) -> Self {
        Self {
            on_run: Box::new(on_run),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Everything the runner was asked to execute, in order.
    pub fn requests(&self) -> Vec<RunRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn run(&self, request: &RunRequest) -> io::Result<i32> {
        self.requests.lock().unwrap().push(request.clone());
        (self.on_run)(request)
    }
}

/// Write a zip archive at `dest` with the given `(path, contents)` entries.
pub fn write_zip(dest: &Utf8Path, entries: &[(&str, &[u8])]) {
    let file = fs_err::File::create(dest).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default().unix_permissions(0o755);
    for (path, contents) in entries {
        zip.start_file(*path, options).unwrap();
        zip.write_all(contents).unwrap();
    }
    zip.finish().unwrap();
}

/// Zip archive as bytes, for serving over a mocked HTTP endpoint.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut cursor = io::Cursor::new(Vec::new());
    let mut zip = zip::ZipWriter::new(&mut cursor);
    let options = zip::write::SimpleFileOptions::default().unix_permissions(0o755);
    for (path, contents) in entries {
        zip.start_file(*path, options).unwrap();
        zip.write_all(contents).unwrap();
    }
    zip.finish().unwrap();
    cursor.into_inner()
}

/// Write a gzipped tar archive at `dest` with the given entries.
pub fn write_tar_gz(dest: &Utf8Path, entries: &[(&str, &[u8])]) {
    let file = fs_err::File::create(dest).unwrap();
    let encoder = GzEncoder::new(file, Compression::fast());
    let mut tar = tar::Builder::new(encoder);
    for (path, contents) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        tar.append_data(&mut header, path, *contents).unwrap();
    }
    tar.into_inner().unwrap().finish().unwrap();
}
