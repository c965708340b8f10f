//! Transaction naming strategies.

use axum::extract::Request;

use crate::config::NamingStrategyKind;
use crate::context::RouteName;

/// Produces the transaction name for a request.
pub trait TransactionNamingStrategy: Send + Sync {
    fn transaction_name(&self, req: &Request) -> String;
}

/// Names transactions after the route: explicit `RouteName`, else the
/// matched route template.
#[derive(Debug, Default, Clone, Copy)]
pub struct RouteNamingStrategy;

impl TransactionNamingStrategy for RouteNamingStrategy {
    fn transaction_name(&self, req: &Request) -> String {
        RouteName::of(req).unwrap_or("Unknown route").to_string()
    }
}

/// Names transactions `METHOD /path`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UriNamingStrategy;

impl TransactionNamingStrategy for UriNamingStrategy {
    fn transaction_name(&self, req: &Request) -> String {
        format!("{} {}", req.method(), req.uri().path())
    }
}

/// Any `Fn(&Request) -> String` is a strategy.
impl<F> TransactionNamingStrategy for F
where
    F: Fn(&Request) -> String + Send + Sync,
{
    fn transaction_name(&self, req: &Request) -> String {
        self(req)
    }
}

pub fn from_kind(kind: NamingStrategyKind) -> Box<dyn TransactionNamingStrategy> {
    match kind {
        NamingStrategyKind::Route => Box::new(RouteNamingStrategy),
        NamingStrategyKind::Uri => Box::new(UriNamingStrategy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(uri: &str) -> Request {
        Request::builder().method("POST").uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn route_falls_back_to_unknown() {
        assert_eq!(RouteNamingStrategy.transaction_name(&request("/x")), "Unknown route");
    }

    #[test]
    fn route_prefers_explicit_name() {
        let mut req = request("/users/42");
        req.extensions_mut().insert(RouteName("user_show".into()));
        assert_eq!(RouteNamingStrategy.transaction_name(&req), "user_show");
    }

    #[test]
    fn uri_uses_method_and_path() {
        assert_eq!(UriNamingStrategy.transaction_name(&request("/a/b?q=1")), "POST /a/b");
    }

    #[test]
    fn closures_are_strategies() {
        let s = |_: &Request| "fixed".to_string();
        assert_eq!(s.transaction_name(&request("/")), "fixed");
    }
}
