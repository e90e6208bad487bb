//! Response format selection by path suffix.

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::AppError;
use crate::markup::XmlNode;

/// Response encoding requested by a route suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// `.json` or no suffix.
    #[default]
    Json,
    /// `.xml`.
    Xml,
}

impl Format {
    /// Split a trailing `.json` / `.xml` off a path segment.
    ///
    /// A segment without a dot is the stem in JSON form. Any other suffix is
    /// rejected.
    pub fn split(segment: &str) -> Result<(&str, Format), AppError> {
        match segment.rsplit_once('.') {
            None => Ok((segment, Format::Json)),
            Some((stem, "json")) => Ok((stem, Format::Json)),
            Some((stem, "xml")) => Ok((stem, Format::Xml)),
            Some((_, other)) => Err(AppError::NotFound(format!(
                "unsupported response format `.{}`",
                other
            ))),
        }
    }

    /// Encode `data` as JSON or as the XML tree built by `to_xml`.
    pub fn respond<T, F>(self, data: &T, to_xml: F) -> Response
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T) -> XmlNode,
    {
        match self {
            Format::Json => Json(data).into_response(),
            Format::Xml => (
                [(header::CONTENT_TYPE, "application/xml")],
                to_xml(data).render(),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_suffixes() {
        assert_eq!(Format::split("775").unwrap(), ("775", Format::Json));
        assert_eq!(Format::split("775.json").unwrap(), ("775", Format::Json));
        assert_eq!(Format::split("775.xml").unwrap(), ("775", Format::Xml));
        assert!(matches!(Format::split("775.csv"), Err(AppError::NotFound(_))));
    }
}
