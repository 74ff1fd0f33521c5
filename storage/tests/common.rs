use std::fs;
use tempfile::TempDir;

/// 创建一个原始图片目录：混有非图片文件和子目录
pub fn create_originals() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(root.join("b_second.png"), b"png bytes").unwrap();
    fs::write(root.join("a_first.jpg"), b"jpg bytes").unwrap();
    fs::write(root.join("c_third.JPEG"), b"jpeg bytes").unwrap();
    fs::write(root.join("notes.txt"), b"not an image").unwrap();
    fs::write(root.join(".DS_Store"), b"").unwrap();

    // 子目录里的图片不参与配对
    fs::create_dir_all(root.join("nested")).unwrap();
    fs::write(root.join("nested").join("d_hidden.jpg"), b"nested").unwrap();

    temp_dir
}
