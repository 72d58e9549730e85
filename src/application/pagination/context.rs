//! Pagination context resolution
//!
//! A handler declares its query parameters as [`ParameterDecl`] values. The
//! declarations are resolved once, when the route is built, into an immutable
//! [`PaginationContext`] naming the offset/limit parameters and their
//! defaults. Per request, the context turns the query string into the
//! effective [`PageWindow`].

use url::form_urlencoded;

use super::parameters::{parse_limit, parse_offset, Limit, Offset};
use crate::domain::PageWindow;
use crate::support::errors::{ContextError, ParameterError, ParameterKind};

/// A handler parameter as declared on the route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterDecl {
    /// Bound query parameter name; `None` for path/body/header parameters.
    pub query_name: Option<String>,
    /// Raw default used when the request omits the parameter.
    pub default_value: Option<String>,
    /// Set when the parameter is explicitly the pagination offset or limit.
    pub marker: Option<ParameterKind>,
}

impl ParameterDecl {
    pub fn query(name: impl Into<String>) -> Self {
        Self {
            query_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// A parameter that is not read from the query string.
    pub fn unbound() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn marked_as(mut self, kind: ParameterKind) -> Self {
        self.marker = Some(kind);
        self
    }
}

/// Names and defaults of the pagination parameters for one handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationContext {
    offset_param: String,
    limit_param: String,
    default_offset: Offset,
    default_limit: Limit,
}

impl Default for PaginationContext {
    fn default() -> Self {
        Self {
            offset_param: ParameterKind::Offset.default_name().to_string(),
            limit_param: ParameterKind::Limit.default_name().to_string(),
            default_offset: Offset::DEFAULT,
            default_limit: Limit::DEFAULT,
        }
    }
}

impl PaginationContext {
    pub fn new(
        offset_param: impl Into<String>,
        limit_param: impl Into<String>,
        default_offset: Offset,
        default_limit: Limit,
    ) -> Result<Self, ContextError> {
        let offset_param = offset_param.into();
        let limit_param = limit_param.into();

        if offset_param.is_empty() {
            return Err(ContextError::EmptyName(ParameterKind::Offset));
        }
        if limit_param.is_empty() {
            return Err(ContextError::EmptyName(ParameterKind::Limit));
        }
        if offset_param == limit_param {
            return Err(ContextError::SharedName(offset_param));
        }

        Ok(Self {
            offset_param,
            limit_param,
            default_offset,
            default_limit,
        })
    }

    /// Builds the context from a handler's declared parameters.
    ///
    /// A parameter marked as the offset (limit) parameter renames it and
    /// supplies its default. Without a marker, the parameter bound to the
    /// default name (`offset`/`limit`, ASCII case-insensitive) supplies the
    /// default while the default name stays in use; absent that, the built-in
    /// defaults `0` and `20` apply.
    ///
    /// Two markers for the same role, a marker on a parameter without a query
    /// binding, or two unmarked parameters bound to the default name are
    /// errors rather than a silent pick.
    pub fn resolve(params: &[ParameterDecl]) -> Result<Self, ContextError> {
        let (offset_param, offset_decl) = resolve_role(params, ParameterKind::Offset)?;
        let (limit_param, limit_decl) = resolve_role(params, ParameterKind::Limit)?;

        let default_offset = match offset_decl.and_then(|d| d.default_value.as_deref()) {
            Some(raw) => parse_offset(raw).map_err(|source| ContextError::InvalidDefault {
                name: offset_param.clone(),
                source: source.for_field(&offset_param),
            })?,
            None => Offset::DEFAULT,
        };

        let default_limit = match limit_decl.and_then(|d| d.default_value.as_deref()) {
            Some(raw) => parse_limit(raw).map_err(|source| ContextError::InvalidDefault {
                name: limit_param.clone(),
                source: source.for_field(&limit_param),
            })?,
            None => Limit::DEFAULT,
        };

        Self::new(offset_param, limit_param, default_offset, default_limit)
    }

    pub fn offset_param(&self) -> &str {
        &self.offset_param
    }

    pub fn limit_param(&self) -> &str {
        &self.limit_param
    }

    pub fn default_offset(&self) -> Offset {
        self.default_offset
    }

    pub fn default_limit(&self) -> Limit {
        self.default_limit
    }

    /// Effective offset/limit for a request's raw query string.
    ///
    /// Only the first occurrence of each parameter counts. Present values are
    /// validated; absent ones fall back to the context defaults.
    pub fn window(&self, query: Option<&str>) -> Result<PageWindow, ParameterError> {
        let mut raw_offset = None;
        let mut raw_limit = None;

        for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            if raw_offset.is_none() && key == self.offset_param.as_str() {
                raw_offset = Some(value);
            } else if raw_limit.is_none() && key == self.limit_param.as_str() {
                raw_limit = Some(value);
            }
        }

        let offset = match raw_offset {
            Some(raw) => parse_offset(&raw).map_err(|e| e.for_field(&self.offset_param))?,
            None => self.default_offset,
        };
        let limit = match raw_limit {
            Some(raw) => parse_limit(&raw).map_err(|e| e.for_field(&self.limit_param))?,
            None => self.default_limit,
        };

        Ok(PageWindow::new(offset.get(), limit.get()))
    }
}

fn resolve_role(
    params: &[ParameterDecl],
    kind: ParameterKind,
) -> Result<(String, Option<&ParameterDecl>), ContextError> {
    let marked: Vec<&ParameterDecl> = params
        .iter()
        .filter(|p| p.marker == Some(kind))
        .collect();

    match marked.as_slice() {
        [] => {}
        [decl] => {
            let name = decl
                .query_name
                .clone()
                .ok_or(ContextError::UnboundMarker(kind))?;
            return Ok((name, Some(*decl)));
        }
        _ => return Err(ContextError::DuplicateMarker(kind)),
    }

    let name = kind.default_name();
    let candidates: Vec<&ParameterDecl> = params
        .iter()
        .filter(|p| {
            p.marker.is_none()
                && p.query_name
                    .as_deref()
                    .is_some_and(|q| q.eq_ignore_ascii_case(name))
        })
        .collect();

    match candidates.as_slice() {
        [] => Ok((name.to_string(), None)),
        [decl] => Ok((name.to_string(), Some(*decl))),
        _ => Err(ContextError::AmbiguousParameter {
            kind,
            name: name.to_string(),
        }),
    }
}
