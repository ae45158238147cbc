use crate::types::{InfraError, InfraResult};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;

/// ファイルパスからBufReaderを作成する
/// パースやデータ変換は各ドメインで行う
pub fn load_file(file_path: &str) -> InfraResult<BufReader<File>> {
    let file = File::open(file_path).map_err(|e| InfraError::file_system(file_path, e))?;
    Ok(BufReader::new(file))
}

/// YAMLファイルからSerdeでDeserializeできる型を読み込む
pub fn load_yaml_from_file<T: DeserializeOwned>(file_path: &str) -> InfraResult<T> {
    let buf_reader = load_file(file_path)?;
    serde_yaml::from_reader(buf_reader).map_err(|e| InfraError::yaml(file_path, e))
}

/// YAML文字列からSerdeでDeserializeできる型を読み込む
pub fn load_yaml_from_str<T: DeserializeOwned>(context: &str, content: &str) -> InfraResult<T> {
    serde_yaml::from_str(content).map_err(|e| InfraError::yaml(context, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_load_existing_file() {
        // 存在するファイルを読み込めることを確認
        let result = load_file("Cargo.toml");
        assert!(result.is_ok(), "既存ファイルの読み込みに失敗");
    }

    #[test]
    fn test_load_non_existing_file() {
        // 存在しないファイルでエラーになることを確認
        let result = load_file("non_existent_file.txt");
        assert!(
            matches!(result, Err(InfraError::FileSystem { .. })),
            "存在しないファイルでエラーにならなかった"
        );
    }

    #[test]
    fn test_load_yaml_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("一時ファイルの作成に失敗");
        writeln!(file, "kyiv: 882\nlviv: 1256").expect("一時ファイルへの書き込みに失敗");

        let path = file.path().to_string_lossy().to_string();
        let map: HashMap<String, u32> = load_yaml_from_file(&path).expect("YAMLの読み込みに失敗");
        assert_eq!(map.get("kyiv"), Some(&882));
        assert_eq!(map.get("lviv"), Some(&1256));
    }

    #[test]
    fn test_load_yaml_from_str_reports_context() {
        let result: InfraResult<Vec<u32>> = load_yaml_from_str("inline", "- 1\n- zwei");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("inline"));
    }
}
