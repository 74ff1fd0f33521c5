use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use utils::error::{Error, Result};
use walkdir::WalkDir;

const HASH_CHUNK: usize = 8192;

/// 列出目录下（不递归）扩展名匹配的原始图片，按文件名排序
pub fn list_originals(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::new(format!(
            "Originals directory not found: {}",
            dir.display()
        )));
    }

    let mut originals = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| {
            Error::with_source(format!("Failed to read {}", dir.display()), Box::new(e))
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        if has_extension(entry.path(), extensions) {
            originals.push(entry.into_path());
        }
    }

    Ok(originals)
}

/// 扩展名比较不区分大小写，允许配置里带或不带前导点
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };

    extensions
        .iter()
        .any(|want| want.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

/// 计算文件内容的 SHA-256，返回小写十六进制
pub fn hash_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; HASH_CHUNK];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// 删除文件，不存在视为成功
pub fn remove_if_exists(path: &Path) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn exts() -> Vec<String> {
        vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()]
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("a.JPG"), &exts()));
        assert!(has_extension(Path::new("b.png"), &exts()));
        assert!(!has_extension(Path::new("c.gif"), &exts()));
        assert!(!has_extension(Path::new("README"), &exts()));
        assert!(has_extension(Path::new("d.jpeg"), &[".jpeg".to_string()]));
    }

    #[test]
    fn test_hash_file_known_digest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("abc.bin");
        fs::write(&path, b"abc").unwrap();

        assert_eq!(
            hash_file(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hash_file_spans_chunks() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");
        let mut content = vec![7u8; HASH_CHUNK * 3 + 11];
        fs::write(&a, &content).unwrap();
        *content.last_mut().unwrap() = 8;
        fs::write(&b, &content).unwrap();

        assert_ne!(hash_file(&a).unwrap(), hash_file(&b).unwrap());
    }

    #[test]
    fn test_hash_missing_file_is_error() {
        let dir = tempdir().unwrap();
        assert!(hash_file(&dir.path().join("nope.jpg")).is_err());
    }

    #[test]
    fn test_remove_if_exists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tmp.jpg");
        fs::write(&path, b"x").unwrap();

        remove_if_exists(&path).unwrap();
        assert!(!path.exists());
        remove_if_exists(&path).unwrap();
    }
}
