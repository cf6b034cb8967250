use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::error::Error;

pub fn read_lines(path: &Path) -> Result<Vec<String>, Error> {
    let file = File::open(path).map_err(|e| Error::FileOpen(path.display().to_string(), e))?;
    BufReader::new(file)
        .lines()
        .map(|line| line.map_err(Error::FileRead))
        .collect()
}

/// `.hack` text: one 16-digit binary word per line.
pub fn format_hack(words: impl IntoIterator<Item = u16>) -> String {
    words
        .into_iter()
        .map(|word| format!("{:016b}\n", word))
        .collect()
}

/// Writes every file or none of them. All contents go to temporary files
/// first, which are renamed over their destinations once all are written.
pub fn write_all(files: &[(&Path, String)]) -> Result<(), Error> {
    let mut staged = vec![];
    for (path, text) in files {
        match stage(path, text.as_bytes()) {
            Ok(tmp) => staged.push((tmp, *path)),
            Err(err) => {
                discard(&staged);
                return Err(err);
            }
        }
    }

    for (idx, (tmp, path)) in staged.iter().enumerate() {
        if let Err(e) = std::fs::rename(tmp, path) {
            discard(&staged[idx..]);
            return Err(Error::FileWrite(path.display().to_string(), e));
        }
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

fn stage(path: &Path, bytes: &[u8]) -> Result<PathBuf, Error> {
    let name = path.display().to_string();
    let tmp = tmp_path(path);

    let write = || -> Result<(), Error> {
        let file = File::create(&tmp).map_err(|e| Error::FileCreate(name.clone(), e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(bytes)
            .and_then(|_| writer.flush())
            .map_err(|e| Error::FileWrite(name.clone(), e))
    };

    match write() {
        Ok(()) => Ok(tmp),
        Err(err) => {
            let _ = std::fs::remove_file(&tmp);
            Err(err)
        }
    }
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (tmp, _) in staged {
        let _ = std::fs::remove_file(tmp);
    }
}
