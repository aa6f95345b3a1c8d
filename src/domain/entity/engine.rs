use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// MySQLのストレージエンジン
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum StorageEngine {
    #[strum(serialize = "InnoDB")]
    #[serde(rename = "InnoDB")]
    InnoDb,

    #[strum(serialize = "MyISAM")]
    #[serde(rename = "MyISAM")]
    MyIsam,

    Memory,

    Archive,
}

/// 性能シミュレーションのワークロード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Workload {
    #[strum(to_string = "OLTP (Many small transactions)", serialize = "oltp")]
    Oltp,

    #[strum(to_string = "OLAP (Large analytical queries)", serialize = "olap")]
    Olap,

    #[strum(to_string = "Read-heavy (Mostly SELECT)", serialize = "read-heavy")]
    ReadHeavy,

    #[strum(to_string = "Write-heavy (Many INSERTs/UPDATEs)", serialize = "write-heavy")]
    WriteHeavy,
}

/// エンジン機能比較表の1列分
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineFeatures {
    pub engine: StorageEngine,
    pub acid_compliance: bool,
    pub foreign_keys: bool,
    pub locking: &'static str,
    pub crash_recovery: bool,
    pub full_text_search: bool,
    pub memory_usage: &'static str,
    pub best_use_case: &'static str,
}

impl StorageEngine {
    pub fn features(&self) -> EngineFeatures {
        let (acid, fk, locking, recovery, full_text, memory, use_case) = match self {
            StorageEngine::InnoDb => (true, true, "Row-level", true, true, "Higher", "OLTP"),
            StorageEngine::MyIsam => (false, false, "Table-level", false, true, "Lower", "Read-heavy"),
            StorageEngine::Memory => (false, false, "Table-level", false, false, "RAM only", "Temporary"),
            StorageEngine::Archive => (false, false, "Row-level", true, false, "Very low", "Archival"),
        };

        EngineFeatures {
            engine: *self,
            acid_compliance: acid,
            foreign_keys: fk,
            locking,
            crash_recovery: recovery,
            full_text_search: full_text,
            memory_usage: memory,
            best_use_case: use_case,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use test_case::test_case;

    #[test_case("oltp", Workload::Oltp ; "short oltp")]
    #[test_case("OLAP", Workload::Olap ; "upper olap")]
    #[test_case("Read-heavy (Mostly SELECT)", Workload::ReadHeavy ; "full label")]
    #[test_case("write-heavy", Workload::WriteHeavy ; "short write heavy")]
    fn parses_workload(input: &str, expected: Workload) {
        assert_eq!(Workload::from_str(input).unwrap(), expected);
    }

    #[test]
    fn workload_displays_full_label() {
        assert_eq!(Workload::WriteHeavy.to_string(), "Write-heavy (Many INSERTs/UPDATEs)");
        assert!(Workload::from_str("batch").is_err());
    }

    #[test]
    fn engine_names() {
        assert_eq!(StorageEngine::InnoDb.to_string(), "InnoDB");
        assert_eq!(StorageEngine::from_str("myisam").unwrap(), StorageEngine::MyIsam);
        assert_eq!(serde_json::to_string(&StorageEngine::InnoDb).unwrap(), "\"InnoDB\"");
    }

    #[test]
    fn only_innodb_has_foreign_keys() {
        use strum::IntoEnumIterator;
        let with_fk: Vec<StorageEngine> = StorageEngine::iter()
            .filter(|e| e.features().foreign_keys)
            .collect();
        assert_eq!(with_fk, [StorageEngine::InnoDb]);
    }
}
