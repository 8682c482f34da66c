//! Required-attribute extraction
//!
//! Thin wrappers over the typed [`DocumentNode`] getters that turn an absent
//! or invalid value into a fatal [`LoadError`] naming where it was expected.

use super::LoadError;
use crate::document::DocumentNode;
use crate::foundation::math::{Vec3, Vec4};
use crate::scene::Rgba;

fn invalid(context: &str, attribute: &'static str) -> LoadError {
    LoadError::InvalidAttribute {
        context: context.to_string(),
        attribute,
    }
}

pub(super) fn string<'n>(
    node: &'n DocumentNode,
    attribute: &'static str,
    context: &str,
) -> Result<&'n str, LoadError> {
    node.get_string(attribute)
        .ok_or_else(|| invalid(context, attribute))
}

pub(super) fn float(
    node: &DocumentNode,
    attribute: &'static str,
    context: &str,
) -> Result<f32, LoadError> {
    node.get_float(attribute).ok_or_else(|| invalid(context, attribute))
}

/// Float that may be absent, but must be valid when present
pub(super) fn optional_float(
    node: &DocumentNode,
    attribute: &'static str,
    context: &str,
) -> Result<Option<f32>, LoadError> {
    if node.get_string(attribute).is_none() {
        return Ok(None);
    }
    float(node, attribute, context).map(Some)
}

pub(super) fn integer(
    node: &DocumentNode,
    attribute: &'static str,
    context: &str,
) -> Result<i64, LoadError> {
    node.get_integer(attribute).ok_or_else(|| invalid(context, attribute))
}

/// Boolean with a default for when it is absent
pub(super) fn boolean_or(
    node: &DocumentNode,
    attribute: &'static str,
    default: bool,
    context: &str,
) -> Result<bool, LoadError> {
    if node.get_string(attribute).is_none() {
        return Ok(default);
    }
    node.get_boolean(attribute)
        .ok_or_else(|| invalid(context, attribute))
}

pub(super) fn vec3(node: &DocumentNode, context: &str) -> Result<Vec3, LoadError> {
    Ok(Vec3::new(
        float(node, "x", context)?,
        float(node, "y", context)?,
        float(node, "z", context)?,
    ))
}

pub(super) fn vec4(node: &DocumentNode, context: &str) -> Result<Vec4, LoadError> {
    Ok(Vec4::new(
        float(node, "x", context)?,
        float(node, "y", context)?,
        float(node, "z", context)?,
        float(node, "w", context)?,
    ))
}

pub(super) fn rgba(node: &DocumentNode, context: &str) -> Result<Rgba, LoadError> {
    Ok(Rgba::new(
        float(node, "r", context)?,
        float(node, "g", context)?,
        float(node, "b", context)?,
        float(node, "a", context)?,
    ))
}

pub(super) fn required_child<'n>(
    node: &'n DocumentNode,
    element: &'static str,
    context: &str,
) -> Result<&'n DocumentNode, LoadError> {
    node.child(element).ok_or_else(|| LoadError::MissingElement {
        context: context.to_string(),
        element,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_float_rejects_garbage_but_allows_absence() {
        let node =
            DocumentNode::new("texture").with_attr("length_s", "2").with_attr("length_t", "x");
        assert_eq!(optional_float(&node, "length_s", "texture 't'").unwrap(), Some(2.0));
        assert_eq!(optional_float(&node, "missing", "texture 't'").unwrap(), None);
        let err = optional_float(&node, "length_t", "texture 't'").unwrap_err();
        assert_eq!(err.to_string(), "unable to parse 'length_t' of texture 't'");
    }

    #[test]
    fn test_rgba_requires_all_channels() {
        let node =
            DocumentNode::new("diffuse").with_attr("r", 1).with_attr("g", 0.5).with_attr("b", 0);
        assert!(matches!(
            rgba(&node, "material 'm'"),
            Err(LoadError::InvalidAttribute { attribute: "a", .. })
        ));
    }

    #[test]
    fn test_boolean_default_only_when_absent() {
        let absent = DocumentNode::new("omni");
        let garbage = DocumentNode::new("omni").with_attr("enabled", "maybe");
        assert!(boolean_or(&absent, "enabled", true, "light").unwrap());
        assert!(boolean_or(&garbage, "enabled", true, "light").is_err());
    }
}
