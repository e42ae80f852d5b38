//! Correlation identifier for one territory request.
//!
//! The HTTP layer opens a [`TraceId::scope`] around each request; errors built
//! while it is open pick the id up through [`TraceId::current`] and report it
//! in their problem body. The id lives in a Tokio task-local, so work moved to
//! another task must open its own scope.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Header echoing the identifier on every response.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// UUID naming one request in logs, headers, and problem bodies.
///
/// # Examples
/// ```
/// use territory_backend::TraceId;
///
/// async fn detail() -> String {
///     TraceId::current().map_or_else(|| "untraced".to_owned(), |id| id.to_string())
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Accept a caller-supplied identifier.
    ///
    /// Surrounding whitespace is ignored. The nil UUID is refused because it
    /// would merge unrelated requests in the logs.
    ///
    /// # Examples
    /// ```
    /// use territory_backend::TraceId;
    ///
    /// assert!(TraceId::from_header(" 3f2b8c1e-7a4d-4e0f-9b6a-2c5d8e1f0a3b ").is_some());
    /// assert!(TraceId::from_header("00000000-0000-0000-0000-000000000000").is_none());
    /// assert!(TraceId::from_header("request-7").is_none());
    /// ```
    #[must_use]
    pub fn from_header(raw: &str) -> Option<Self> {
        raw.trim().parse::<Self>().ok().filter(|id| !id.0.is_nil())
    }

    /// Identifier of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current identifier.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn scope_sets_and_clears_the_current_id() {
        let id = TraceId::generate();
        assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
        assert!(TraceId::current().is_none());
    }

    #[tokio::test]
    async fn nested_scopes_shadow_the_outer_id() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();
        let seen = TraceId::scope(outer, async move {
            let nested = TraceId::scope(inner, async { TraceId::current() }).await;
            (nested, TraceId::current())
        })
        .await;
        assert_eq!(seen, (Some(inner), Some(outer)));
    }

    #[rstest]
    #[case("3f2b8c1e-7a4d-4e0f-9b6a-2c5d8e1f0a3b", true)]
    #[case("  3f2b8c1e-7a4d-4e0f-9b6a-2c5d8e1f0a3b\t", true)]
    #[case("00000000-0000-0000-0000-000000000000", false)]
    #[case("not-a-uuid", false)]
    #[case("", false)]
    fn header_values_are_screened(#[case] raw: &str, #[case] accepted: bool) {
        assert_eq!(TraceId::from_header(raw).is_some(), accepted);
    }

    #[rstest]
    fn display_is_lowercase_hyphenated() {
        let id: TraceId = "3F2B8C1E-7A4D-4E0F-9B6A-2C5D8E1F0A3B".parse().expect("uuid");
        assert_eq!(id.to_string(), "3f2b8c1e-7a4d-4e0f-9b6a-2c5d8e1f0a3b");
    }
}
