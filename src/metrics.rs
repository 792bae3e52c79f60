//! Prometheus metrics for the GraphQL surface
//!
//! Recording functions are no-ops until [`init`] installs the recorder, so
//! resolvers call them unconditionally.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use std::fmt;
use tracing::{info, warn};

/// All metric names used by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    GraphqlRequests,
    PostsCreated,
    PostsUpdated,
    PostsDeleted,
    UsersRegistered,
    RegistrationsRejected,
    LoginsSucceeded,
    LoginsFailed,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::GraphqlRequests => "reddit_graphql_requests_total",
            MetricName::PostsCreated => "reddit_posts_created_total",
            MetricName::PostsUpdated => "reddit_posts_updated_total",
            MetricName::PostsDeleted => "reddit_posts_deleted_total",
            MetricName::UsersRegistered => "reddit_users_registered_total",
            MetricName::RegistrationsRejected => "reddit_registrations_rejected_total",
            MetricName::LoginsSucceeded => "reddit_logins_succeeded_total",
            MetricName::LoginsFailed => "reddit_logins_failed_total",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MetricName::GraphqlRequests => "GraphQL requests received",
            MetricName::PostsCreated => "Posts created",
            MetricName::PostsUpdated => "Posts updated",
            MetricName::PostsDeleted => "Posts deleted",
            MetricName::UsersRegistered => "Users registered",
            MetricName::RegistrationsRejected => "Registrations rejected with a field error",
            MetricName::LoginsSucceeded => "Successful logins",
            MetricName::LoginsFailed => "Logins rejected with a field error",
        }
    }

    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        use MetricName::*;
        [
            GraphqlRequests,
            PostsCreated,
            PostsUpdated,
            PostsDeleted,
            UsersRegistered,
            RegistrationsRejected,
            LoginsSucceeded,
            LoginsFailed,
        ]
        .into_iter()
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder. Idempotent.
pub fn init() {
    if HANDLE.get().is_some() {
        return;
    }
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            for name in MetricName::all_metrics() {
                ::metrics::describe_counter!(name.as_str(), name.description());
            }
            let _ = HANDLE.set(handle);
            info!("Metrics recorder installed");
        }
        Err(e) => warn!("Failed to install Prometheus recorder: {}", e),
    }
}

/// Render the current metrics in Prometheus text format
pub fn render() -> String {
    HANDLE.get().map(|h| h.render()).unwrap_or_default()
}

fn increment(name: MetricName) {
    ::metrics::counter!(name.as_str()).increment(1);
}

pub fn graphql_request() {
    increment(MetricName::GraphqlRequests);
}

pub mod posts {
    use super::{increment, MetricName};

    pub fn created() {
        increment(MetricName::PostsCreated);
    }

    pub fn updated() {
        increment(MetricName::PostsUpdated);
    }

    pub fn deleted() {
        increment(MetricName::PostsDeleted);
    }
}

pub mod users {
    use super::MetricName;

    pub fn registered() {
        super::increment(MetricName::UsersRegistered);
    }

    pub fn registration_rejected(field: &'static str) {
        ::metrics::counter!(MetricName::RegistrationsRejected.as_str(), "field" => field).increment(1);
    }

    pub fn login_succeeded() {
        super::increment(MetricName::LoginsSucceeded);
    }

    pub fn login_failed(field: &'static str) {
        ::metrics::counter!(MetricName::LoginsFailed.as_str(), "field" => field).increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn metric_names_are_unique_and_prometheus_style() {
        let names: HashSet<_> = MetricName::all_metrics().map(|m| m.as_str()).collect();
        assert_eq!(names.len(), MetricName::all_metrics().count());
        for name in names {
            assert!(name.starts_with("reddit_"));
            assert!(name.ends_with("_total"));
        }
    }

    #[test]
    fn render_before_init_is_empty() {
        if HANDLE.get().is_none() {
            assert!(render().is_empty());
        }
    }
}
