use derive_more::{AsRef, Deref, Display, From, Into};
use palette::Srgb;
use palette::rgb::FromHexError;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct EmotionId(String);

crate::impl_string_newtype!(EmotionId);

/// Fill color of a wedge, written as a hex string (`#FCD34D`) in data files.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr, SerializeDisplay)]
pub struct Color(Srgb<u8>);

impl Color {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    pub fn rgb(&self) -> Srgb<u8> {
        self.0
    }

    pub fn to_f64(self) -> Srgb<f64> {
        self.0.into_format()
    }
}

impl FromStr for Color {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::from_str(s.trim()).map(Self)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}",
            self.0.red, self.0.green, self.0.blue
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryNode {
    #[serde(default)]
    pub id: EmotionId,
    pub name: String,
    pub color: Color,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub opposites: BTreeSet<EmotionId>,
    #[serde(default)]
    pub intensity: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryNode>,
}

/// Position of a node in the tree: its primary index and, for sub-nodes, the
/// index within that primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub primary: usize,
    pub sub: Option<usize>,
}

impl NodeRef {
    pub fn is_primary(&self) -> bool {
        self.sub.is_none()
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Emotion catalog has no primary emotions")]
    Empty,
    #[error("Emotion '{name}' has no id")]
    EmptyId { name: String },
    #[error("Duplicate emotion id '{0}'")]
    DuplicateId(EmotionId),
    #[error("Intensity {value} of '{id}' is outside 0-10")]
    IntensityOutOfRange { id: EmotionId, value: f64 },
    #[error("Sub-emotion '{0}' has children, the wheel only has two rings")]
    TooDeep(EmotionId),
    #[error("Failed to parse emotion data: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Failed to read emotion data: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    emotions: Vec<CategoryNode>,
}

const DEFAULT_EMOTIONS: &str = include_str!("default_emotions.toml");

/// Validated, immutable emotion tree with a reverse index from every id to
/// its place in the tree.
#[derive(Debug, Clone)]
pub struct Catalog {
    emotions: Vec<CategoryNode>,
    index: HashMap<EmotionId, NodeRef>,
}

impl Catalog {
    pub fn new(emotions: Vec<CategoryNode>) -> Result<Self, CatalogError> {
        let index = Self::build_index(&emotions)?;
        let catalog = Self { emotions, index };
        catalog.warn_dangling_opposites();
        Ok(catalog)
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(DEFAULT_EMOTIONS)
    }

    pub fn from_toml_str(data: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = config::Config::builder()
            .add_source(config::File::from_str(data, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Self::new(file.emotions)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let data = fs_err::read_to_string(path)?;
        Self::from_toml_str(&data)
    }

    fn build_index(emotions: &[CategoryNode]) -> Result<HashMap<EmotionId, NodeRef>, CatalogError> {
        if emotions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashMap::new();
        let mut insert = |node: &CategoryNode, node_ref: NodeRef| {
            Self::validate_node(node)?;
            match index.insert(node.id.clone(), node_ref) {
                Some(_) => Err(CatalogError::DuplicateId(node.id.clone())),
                None => Ok(()),
            }
        };

        for (i, primary) in emotions.iter().enumerate() {
            insert(primary, NodeRef { primary: i, sub: None })?;

            for (j, sub) in primary.children.iter().enumerate() {
                if !sub.children.is_empty() {
                    return Err(CatalogError::TooDeep(sub.id.clone()));
                }
                insert(sub, NodeRef { primary: i, sub: Some(j) })?;
            }
        }

        Ok(index)
    }

    fn validate_node(node: &CategoryNode) -> Result<(), CatalogError> {
        if node.id.trim().is_empty() {
            return Err(CatalogError::EmptyId {
                name: node.name.clone(),
            });
        }
        if let Some(value) = node.intensity
            && !(0.0..=10.0).contains(&value)
        {
            return Err(CatalogError::IntensityOutOfRange {
                id: node.id.clone(),
                value,
            });
        }
        Ok(())
    }

    fn warn_dangling_opposites(&self) {
        for (_, node) in self.iter() {
            for opposite in node.opposites.iter().filter(|o| !self.contains(o)) {
                log::warn!("Emotion '{}' lists unknown opposite '{}'", node.id, opposite);
            }
        }
    }

    pub fn primaries(&self) -> &[CategoryNode] {
        &self.emotions
    }

    pub fn len(&self) -> usize {
        self.emotions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emotions.is_empty()
    }

    /// Number of nodes across both rings.
    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    pub fn contains(&self, id: &EmotionId) -> bool {
        self.index.contains_key(id)
    }

    pub fn locate(&self, id: &EmotionId) -> Option<NodeRef> {
        self.index.get(id).copied()
    }

    pub fn node(&self, node_ref: NodeRef) -> Option<&CategoryNode> {
        let primary = self.emotions.get(node_ref.primary)?;
        match node_ref.sub {
            Some(j) => primary.children.get(j),
            None => Some(primary),
        }
    }

    pub fn get(&self, id: &EmotionId) -> Option<&CategoryNode> {
        self.locate(id).and_then(|r| self.node(r))
    }

    /// Id of the primary that owns `id`, or `id` itself when it is a primary.
    pub fn family_of(&self, id: &EmotionId) -> Option<&EmotionId> {
        self.locate(id)
            .and_then(|r| self.emotions.get(r.primary))
            .map(|primary| &primary.id)
    }

    pub fn opposites_of(&self, id: &EmotionId) -> Vec<&CategoryNode> {
        self.get(id)
            .map(|node| node.opposites.iter().filter_map(|o| self.get(o)).collect())
            .unwrap_or_default()
    }

    /// All nodes in angular order: each primary followed by its children.
    pub fn iter(&self) -> impl Iterator<Item = (NodeRef, &CategoryNode)> {
        self.emotions.iter().enumerate().flat_map(|(i, primary)| {
            std::iter::once((NodeRef { primary: i, sub: None }, primary)).chain(
                primary
                    .children
                    .iter()
                    .enumerate()
                    .map(move |(j, sub)| (NodeRef { primary: i, sub: Some(j) }, sub)),
            )
        })
    }
}
