//! カテゴリ→おすすめ都市の解決
//!
//! テーブルは起動時に一度だけ構築し、以後は読み取り専用。
//! 未知のカテゴリはデフォルトの都市にフォールバックするので、解決は必ず成功する。

use crate::error::{Error, Result};
use crate::types::Destination;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// カテゴリ→都市のテーブル
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTable {
    categories: BTreeMap<String, Destination>,
    default: Destination,
}

impl CategoryTable {
    /// 組み込みテーブル
    pub fn builtin() -> Self {
        let rimini = Destination::new("Rimini", "Римини");

        let mut categories = BTreeMap::new();
        categories.insert("sea".to_string(), rimini.clone());
        categories.insert("ocean".to_string(), rimini.clone());
        categories.insert("beach".to_string(), rimini.clone());
        categories.insert("mountain".to_string(), Destination::new("Sochi", "Сочи"));
        categories.insert("snow".to_string(), Destination::new("Helsinki", "Хельсинки"));

        Self {
            categories,
            default: rimini,
        }
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    ///
    /// 形式: `{"categories": {"sea": {...}}, "default": {"englishName": ..., "localizedName": ...}}`
    pub fn from_json(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<()> {
        if self.default.english_name.is_empty() || self.default.localized_name.is_empty() {
            return Err(Error::Config("デフォルトの都市が空です".into()));
        }
        if let Some(key) = self.categories.keys().find(|k| k.is_empty()) {
            return Err(Error::Config(format!("空のカテゴリ名は使えません: {:?}", key)));
        }
        Ok(())
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    pub fn default_destination(&self) -> &Destination {
        &self.default
    }

    /// 既知のカテゴリと都市の組
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Destination)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn lookup(&self, category: &str) -> &Destination {
        self.categories.get(category).unwrap_or(&self.default)
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// テーブルを所有するリゾルバ
#[derive(Debug, Clone, Default)]
pub struct DestinationResolver {
    table: CategoryTable,
}

impl DestinationResolver {
    pub fn new(table: CategoryTable) -> Self {
        Self { table }
    }

    /// カテゴリに対応する都市を返す（大文字小文字は区別する完全一致）
    pub fn resolve(&self, category: &str) -> &Destination {
        self.table.lookup(category)
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }
}
