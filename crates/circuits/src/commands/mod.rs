//! Invocation planning and dispatch.
//!
//! `plan` applies the argument rules clap can't express (a query is
//! mandatory unless updating or completing, and updating takes no query
//! but needs credentials); `dispatch` runs the chosen action.

pub mod complete;
pub mod connect;
pub mod update;

use secrecy::SecretString;

use circuits_core::{CompletionMode, ConnectConfig};

use crate::cli::{Cli, CompletionTarget};
use crate::error::CliError;

/// What this invocation will do.
#[derive(Debug)]
pub enum Action {
    UpdateCache {
        user: String,
        password: SecretString,
    },
    Complete {
        mode: CompletionMode,
        query: String,
        client: Option<String>,
    },
    Connect {
        query: String,
        client: Option<String>,
        print_only: bool,
    },
}

impl From<CompletionTarget> for CompletionMode {
    fn from(target: CompletionTarget) -> Self {
        match target {
            CompletionTarget::Client => CompletionMode::Client,
            CompletionTarget::Service => CompletionMode::Service,
            CompletionTarget::Network => CompletionMode::Network,
        }
    }
}

fn usage(message: &str) -> CliError {
    CliError::Usage {
        message: message.to_owned(),
    }
}

/// Validate the parsed arguments and decide on an action.
pub fn plan(cli: Cli) -> Result<Action, CliError> {
    let query = cli.query.unwrap_or_default();

    if cli.update.update_cache {
        if !query.is_empty() {
            return Err(usage("--update-cache cannot be called with a query"));
        }
        let (Some(user), Some(password)) = (cli.update.user, cli.update.password) else {
            return Err(usage("--update-cache requires --user and --password"));
        };
        if user.is_empty() || password.is_empty() {
            return Err(usage("--update-cache requires --user and --password"));
        }
        return Ok(Action::UpdateCache {
            user,
            password: SecretString::from(password),
        });
    }

    if let Some(target) = cli.bash_completion {
        return Ok(Action::Complete {
            mode: target.into(),
            query,
            client: cli.client,
        });
    }

    if query.is_empty() {
        return Err(usage("query required"));
    }

    Ok(Action::Connect {
        query,
        client: cli.client,
        print_only: cli.print,
    })
}

/// Run the planned action against the effective configuration.
pub async fn dispatch(action: Action, config: &ConnectConfig) -> Result<(), CliError> {
    match action {
        Action::UpdateCache { user, password } => update::handle(config, &user, &password).await,
        Action::Complete {
            mode,
            query,
            client,
        } => complete::handle(config, mode, &query, client.as_deref()),
        Action::Connect {
            query,
            client,
            print_only,
        } => connect::handle(config, &query, client.as_deref(), print_only),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    fn plan_args(args: &[&str]) -> Result<Action, CliError> {
        let cli = Cli::try_parse_from(std::iter::once("c").chain(args.iter().copied())).unwrap();
        plan(cli)
    }

    fn usage_message(result: Result<Action, CliError>) -> String {
        match result {
            Err(CliError::Usage { message }) => message,
            other => panic!("expected usage error, got: {other:?}"),
        }
    }

    #[test]
    fn query_is_required() {
        assert_eq!(usage_message(plan_args(&[])), "query required");
        assert_eq!(usage_message(plan_args(&[""])), "query required");
    }

    #[test]
    fn update_cache_rejects_query() {
        assert_eq!(
            usage_message(plan_args(&["--update-cache", "-u", "a", "-p", "b", "router1"])),
            "--update-cache cannot be called with a query"
        );
    }

    #[test]
    fn update_cache_needs_credentials() {
        assert_eq!(
            usage_message(plan_args(&["--update-cache", "-u", "a"])),
            "--update-cache requires --user and --password"
        );
        assert_eq!(
            usage_message(plan_args(&["--update-cache", "-p", "b"])),
            "--update-cache requires --user and --password"
        );
    }

    #[test]
    fn update_cache_plans() {
        let action = plan_args(&["--update-cache", "-u", "alice", "-p", "pw"]).unwrap();
        assert!(matches!(action, Action::UpdateCache { ref user, .. } if user == "alice"));
    }

    #[test]
    fn completion_accepts_empty_query() {
        let action = plan_args(&["--bash-completion", "client"]).unwrap();
        assert!(matches!(
            action,
            Action::Complete { mode: CompletionMode::Client, ref query, client: None } if query.is_empty()
        ));
    }

    #[test]
    fn completion_keeps_client_filter() {
        let action = plan_args(&["-c", "acme", "--bash-completion", "service", "svc"]).unwrap();
        assert!(matches!(
            action,
            Action::Complete { mode: CompletionMode::Service, ref client, .. } if client.as_deref() == Some("acme")
        ));
    }

    #[test]
    fn connect_plans_with_print() {
        let action = plan_args(&["--print", "router1"]).unwrap();
        assert!(matches!(action, Action::Connect { print_only: true, ref query, .. } if query == "router1"));
    }
}
