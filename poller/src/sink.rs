use std::{future::Future, io, path::PathBuf};

use growboard_common::MetricFile;

pub trait MetricSink {
    fn write(&self, file: &MetricFile) -> impl Future<Output = io::Result<()>>;
}

/// Writes each metric to `<dir>/<name>`, replacing whatever the previous
/// cycle left there.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub async fn prepare(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }
}

impl MetricSink for FileSink {
    fn write(&self, file: &MetricFile) -> impl Future<Output = io::Result<()>> {
        let path = self.path_for(&file.name);
        let contents = file.contents.clone();
        async move { tokio::fs::write(path, contents).await }
    }
}
