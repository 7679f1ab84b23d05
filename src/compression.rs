use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{Error, Result};

/// A path counts as gzip when the text after its last '.' is `gz`.
pub fn has_gz_suffix<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .to_string_lossy()
        .rsplit('.')
        .next()
        .map(|ext| ext == "gz")
        .unwrap_or(false)
}

/// Open a text file for line reading, decompressing it if it ends in `.gz`.
pub fn open_text_reader<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|e| Error::io(path, e))?;

    let reader: Box<dyn BufRead> = if has_gz_suffix(path) {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };
    Ok(reader)
}

/// Where the overview table goes, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    Plain(PathBuf),
    Gzip(PathBuf),
}

impl OutputTarget {
    /// `None`, empty, `-` and `stdout` all mean standard output.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("") | Some("-") | Some("stdout") => OutputTarget::Stdout,
            Some(p) if has_gz_suffix(p) => OutputTarget::Gzip(PathBuf::from(p)),
            Some(p) => OutputTarget::Plain(PathBuf::from(p)),
        }
    }

    /// Path used when reporting errors for this target.
    pub fn label(&self) -> &Path {
        match self {
            OutputTarget::Stdout => Path::new("stdout"),
            OutputTarget::Plain(p) | OutputTarget::Gzip(p) => p,
        }
    }

    /// Create (or truncate) the destination.
    pub fn open(&self) -> Result<OutputSink> {
        let sink = match self {
            OutputTarget::Stdout => OutputSink::Stdout(BufWriter::new(io::stdout())),
            OutputTarget::Plain(p) => {
                let f = File::create(p).map_err(|e| Error::io(p, e))?;
                OutputSink::Plain(BufWriter::new(f))
            }
            OutputTarget::Gzip(p) => {
                let f = File::create(p).map_err(|e| Error::io(p, e))?;
                OutputSink::Gzip(GzEncoder::new(BufWriter::new(f), Compression::default()))
            }
        };
        Ok(sink)
    }
}

pub enum OutputSink {
    Stdout(BufWriter<Stdout>),
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl OutputSink {
    /// Flush everything, writing the gzip trailer where there is one.
    pub fn finish(self) -> io::Result<()> {
        match self {
            OutputSink::Stdout(mut w) => w.flush(),
            OutputSink::Plain(mut w) => w.flush(),
            OutputSink::Gzip(enc) => enc.finish()?.flush(),
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputSink::Stdout(w) => w.write(buf),
            OutputSink::Plain(w) => w.write(buf),
            OutputSink::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputSink::Stdout(w) => w.flush(),
            OutputSink::Plain(w) => w.flush(),
            OutputSink::Gzip(w) => w.flush(),
        }
    }
}
