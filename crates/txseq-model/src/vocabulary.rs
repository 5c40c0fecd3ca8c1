//! Categorical vocabularies built in first-seen order.

use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::Field;

/// Prefix applied to blank or missing categories so they never collide with
/// a literal category such as `"nan"`.
pub const MISSING_PREFIX: &str = "_";

/// Category assigned to blank or missing values.
pub const MISSING_CATEGORY: &str = "_nan";

/// Raw categorical column that gets an integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoricalField {
    Type,
    Operation,
    KSymbol,
    Tcode,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 4] = [
        CategoricalField::Type,
        CategoricalField::Operation,
        CategoricalField::KSymbol,
        CategoricalField::Tcode,
    ];

    /// Column holding the category strings.
    pub fn column(&self) -> &'static str {
        match self {
            CategoricalField::Type => "type",
            CategoricalField::Operation => "operation",
            CategoricalField::KSymbol => "k_symbol",
            CategoricalField::Tcode => "tcode",
        }
    }

    /// Integer-coded field written next to the category column.
    pub fn num_field(&self) -> Field {
        match self {
            CategoricalField::Type => Field::TypeNum,
            CategoricalField::Operation => Field::OperationNum,
            CategoricalField::KSymbol => Field::KSymbolNum,
            CategoricalField::Tcode => Field::TcodeNum,
        }
    }

    /// `<FIELD>_TO_NUM`
    pub fn to_num_key(&self) -> String {
        format!("{}_TO_NUM", self.column().to_uppercase())
    }

    /// `NUM_TO_<FIELD>`
    pub fn num_to_key(&self) -> String {
        format!("NUM_TO_{}", self.column().to_uppercase())
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Substitutes the missing-value sentinel for blank or absent categories.
///
/// Whitespace only decides blankness; other values are kept verbatim.
pub fn category_or_sentinel(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => MISSING_CATEGORY.to_string(),
    }
}

/// Bijection between category strings and dense ids.
///
/// Ids are assigned in first-seen order starting at 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoricalVocabulary {
    categories: Vec<String>,
    index: HashMap<String, u32>,
}

impl CategoricalVocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a vocabulary from values in observation order.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocab = Self::new();
        for value in values {
            vocab.intern(value.as_ref());
        }
        vocab
    }

    /// Returns the id of `category`, assigning the next id if unseen.
    pub fn intern(&mut self, category: &str) -> u32 {
        if let Some(&id) = self.index.get(category) {
            return id;
        }
        let id = self.categories.len() as u32;
        self.categories.push(category.to_string());
        self.index.insert(category.to_string(), id);
        id
    }

    pub fn id_of(&self, category: &str) -> Option<u32> {
        self.index.get(category).copied()
    }

    pub fn category(&self, id: u32) -> Option<&str> {
        self.categories.get(id as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Categories ordered by id.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.categories
            .iter()
            .enumerate()
            .map(|(id, category)| (id as u32, category.as_str()))
    }

    pub fn to_num_map(&self) -> BTreeMap<String, u32> {
        self.iter()
            .map(|(id, category)| (category.to_string(), id))
            .collect()
    }

    pub fn num_to_map(&self) -> BTreeMap<u32, String> {
        self.iter()
            .map(|(id, category)| (id, category.to_string()))
            .collect()
    }
}

/// One exported vocabulary direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VocabularyMap {
    ToNum(BTreeMap<String, u32>),
    NumTo(BTreeMap<u32, String>),
}

/// Vocabularies for every categorical column of a preprocessing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabularies {
    pub type_: CategoricalVocabulary,
    pub operation: CategoricalVocabulary,
    pub k_symbol: CategoricalVocabulary,
    pub tcode: CategoricalVocabulary,
}

impl Vocabularies {
    pub fn get(&self, field: CategoricalField) -> &CategoricalVocabulary {
        match field {
            CategoricalField::Type => &self.type_,
            CategoricalField::Operation => &self.operation,
            CategoricalField::KSymbol => &self.k_symbol,
            CategoricalField::Tcode => &self.tcode,
        }
    }

    pub fn get_mut(&mut self, field: CategoricalField) -> &mut CategoricalVocabulary {
        match field {
            CategoricalField::Type => &mut self.type_,
            CategoricalField::Operation => &mut self.operation,
            CategoricalField::KSymbol => &mut self.k_symbol,
            CategoricalField::Tcode => &mut self.tcode,
        }
    }

    /// Both directions of every vocabulary under their conventional names.
    pub fn named_maps(&self) -> BTreeMap<String, VocabularyMap> {
        let mut maps = BTreeMap::new();
        for field in CategoricalField::ALL {
            let vocab = self.get(field);
            maps.insert(field.to_num_key(), VocabularyMap::ToNum(vocab.to_num_map()));
            maps.insert(field.num_to_key(), VocabularyMap::NumTo(vocab.num_to_map()));
        }
        maps
    }
}

impl Serialize for Vocabularies {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.named_maps().serialize(serializer)
    }
}
