//! Attribute values exchanged with the scene source
//!
//! The scene source hands out loosely typed values: a required attribute is
//! expected to hold one particular variant, an optional one may be absent or
//! hold something unexpected. `Value` is the tagged union for those, and
//! `AttributeError` describes what went wrong when a value is not what the
//! caller asked for.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::foundation::math::{Mat4d, Vec3};
use super::collection::PrimCollection;
use super::descriptor::{LightDescriptor, ShadowParams};

/// Attribute and parameter names understood by the synchronizer
pub mod tokens {
    /// Light color (`Vec3`)
    pub const COLOR: &str = "color";
    /// Light intensity (`Float`)
    pub const INTENSITY: &str = "intensity";
    /// Light exposure in stops (`Float`)
    pub const EXPOSURE: &str = "exposure";
    /// Dome light environment texture (`AssetPath`)
    pub const TEXTURE_FILE: &str = "textureFile";
    /// Ready-made descriptor of a simple light (`Light`)
    pub const PARAMS: &str = "params";
    /// Shadow parameters (`ShadowParams`)
    pub const SHADOW_PARAMS: &str = "shadowParams";
    /// Shadow collection (`Collection`)
    pub const SHADOW_COLLECTION: &str = "shadowCollection";
    /// Cached world transform
    pub const TRANSFORM: &str = "transform";
}

/// Stable identifier of one light prim, usually its scene path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LightId(String);

impl LightId {
    /// Create an identifier from a scene path
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LightId {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Reference to an asset such as a texture file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetPath {
    /// Path as authored in the scene
    pub authored: String,
    /// Path after asset resolution, if it has been resolved
    pub resolved: Option<String>,
}

impl AssetPath {
    /// Unresolved asset path
    pub fn new(authored: impl Into<String>) -> Self {
        Self {
            authored: authored.into(),
            resolved: None,
        }
    }

    /// Attach the resolved location
    pub fn with_resolved(mut self, resolved: impl Into<String>) -> Self {
        self.resolved = Some(resolved.into());
        self
    }
}

/// Loosely typed attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Single precision scalar
    Float(f32),
    /// Double precision scalar
    Double(f64),
    /// Plain string or token
    String(String),
    /// Three component vector, used for colors
    Vec3(Vec3),
    /// 4x4 transform
    Matrix(Mat4d),
    /// Asset reference
    AssetPath(AssetPath),
    /// Render-ready light descriptor
    Light(LightDescriptor),
    /// Shadow parameters
    ShadowParams(ShadowParams),
    /// Prim collection
    Collection(PrimCollection),
}

/// Discriminant of a `Value`, used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `Value::Bool`
    Bool,
    /// `Value::Int`
    Int,
    /// `Value::Float`
    Float,
    /// `Value::Double`
    Double,
    /// `Value::String`
    String,
    /// `Value::Vec3`
    Vec3,
    /// `Value::Matrix`
    Matrix,
    /// `Value::AssetPath`
    AssetPath,
    /// `Value::Light`
    Light,
    /// `Value::ShadowParams`
    ShadowParams,
    /// `Value::Collection`
    Collection,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Vec3 => "vec3",
            Self::Matrix => "matrix4d",
            Self::AssetPath => "asset path",
            Self::Light => "light descriptor",
            Self::ShadowParams => "shadow params",
            Self::Collection => "prim collection",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Which variant this value holds
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Bool,
            Self::Int(_) => ValueType::Int,
            Self::Float(_) => ValueType::Float,
            Self::Double(_) => ValueType::Double,
            Self::String(_) => ValueType::String,
            Self::Vec3(_) => ValueType::Vec3,
            Self::Matrix(_) => ValueType::Matrix,
            Self::AssetPath(_) => ValueType::AssetPath,
            Self::Light(_) => ValueType::Light,
            Self::ShadowParams(_) => ValueType::ShadowParams,
            Self::Collection(_) => ValueType::Collection,
        }
    }

    // Extractors hand the value back untouched on mismatch so the caller can
    // report what was actually found.

    /// Take a three component vector
    pub fn into_vec3(self) -> Result<Vec3, Self> {
        match self {
            Self::Vec3(v) => Ok(v),
            other => Err(other),
        }
    }

    /// Take a single precision scalar
    pub fn into_float(self) -> Result<f32, Self> {
        match self {
            Self::Float(v) => Ok(v),
            other => Err(other),
        }
    }

    /// Take an asset reference
    pub fn into_asset_path(self) -> Result<AssetPath, Self> {
        match self {
            Self::AssetPath(v) => Ok(v),
            other => Err(other),
        }
    }

    /// Take a light descriptor
    pub fn into_light(self) -> Result<LightDescriptor, Self> {
        match self {
            Self::Light(v) => Ok(v),
            other => Err(other),
        }
    }

    /// Take shadow parameters
    pub fn into_shadow_params(self) -> Result<ShadowParams, Self> {
        match self {
            Self::ShadowParams(v) => Ok(v),
            other => Err(other),
        }
    }

    /// Take a prim collection
    pub fn into_collection(self) -> Result<PrimCollection, Self> {
        match self {
            Self::Collection(v) => Ok(v),
            other => Err(other),
        }
    }
}

/// Keys of the derived attribute cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKey {
    /// World transform
    Transform,
    /// Light descriptor
    Params,
    /// Shadow parameters
    ShadowParams,
    /// Shadow collection
    ShadowCollection,
}

impl ParamKey {
    /// Every cache key
    pub const ALL: [Self; 4] = [
        Self::Transform,
        Self::Params,
        Self::ShadowParams,
        Self::ShadowCollection,
    ];

    /// Token the key is published under
    pub fn token(self) -> &'static str {
        match self {
            Self::Transform => tokens::TRANSFORM,
            Self::Params => tokens::PARAMS,
            Self::ShadowParams => tokens::SHADOW_PARAMS,
            Self::ShadowCollection => tokens::SHADOW_COLLECTION,
        }
    }

    /// Look a key up by token
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.token() == token)
    }
}

/// Problems reading an attribute from the scene source
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttributeError {
    /// Attribute holds a value of the wrong type
    #[error("{light}: attribute '{attribute}' should hold {expected}, found {found}")]
    TypeMismatch {
        /// Light the attribute belongs to
        light: LightId,
        /// Attribute token
        attribute: &'static str,
        /// Type the synchronizer expected
        expected: ValueType,
        /// Type the source actually supplied
        found: ValueType,
    },

    /// Required attribute is not authored
    #[error("{light}: required attribute '{attribute}' is missing")]
    Missing {
        /// Light the attribute belongs to
        light: LightId,
        /// Attribute token
        attribute: &'static str,
    },
}

impl AttributeError {
    /// Attribute token the error refers to
    pub fn attribute(&self) -> &'static str {
        match self {
            Self::TypeMismatch { attribute, .. } | Self::Missing { attribute, .. } => attribute,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_key_tokens_round_trip() {
        for key in ParamKey::ALL {
            assert_eq!(ParamKey::from_token(key.token()), Some(key));
        }
        assert_eq!(ParamKey::from_token("color"), None);
    }

    #[test]
    fn test_value_type() {
        assert_eq!(Value::Float(1.0).value_type(), ValueType::Float);
        assert_eq!(
            Value::AssetPath(AssetPath::new("sky.exr")).value_type(),
            ValueType::AssetPath
        );
        assert_eq!(
            Value::Collection(PrimCollection::default()).value_type(),
            ValueType::Collection
        );
    }

    #[test]
    fn test_extractors_hand_back_value_on_mismatch() {
        assert_eq!(Value::Float(2.0).into_float(), Ok(2.0));
        assert_eq!(
            Value::String("sky.exr".into()).into_asset_path(),
            Err(Value::String("sky.exr".into()))
        );
        assert!(Value::Bool(true).into_collection().is_err());
    }

    #[test]
    fn test_attribute_error_message() {
        let err = AttributeError::TypeMismatch {
            light: LightId::new("/World/Dome"),
            attribute: tokens::TEXTURE_FILE,
            expected: ValueType::AssetPath,
            found: ValueType::String,
        };
        assert_eq!(
            err.to_string(),
            "/World/Dome: attribute 'textureFile' should hold asset path, found string"
        );
        assert_eq!(err.attribute(), "textureFile");
    }
}
