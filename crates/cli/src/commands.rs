//! CLI commands

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use todo_core::{CancellationToken, GuardDecision, NavigationGuard};
use todo_http::client::TodoClient;
use todo_http::types::{Task, TaskUpdate};
use tracing::info;

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and start a session
    Login {
        /// Account email
        email: String,

        /// Account password
        #[arg(long, env = "TODO_PASSWORD", hide_env_values = true)]
        password: String,

        /// Keep a token so later runs can restore the session
        #[arg(long)]
        remember: bool,
    },

    /// Create a new account
    Register {
        /// Account email
        email: String,

        /// Account password
        #[arg(long, env = "TODO_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// End the session and forget the stored token
    Logout,

    /// Show whether the session is active
    Session,

    /// Run the navigation guard for a route and print the outcome
    Open {
        /// Route path, e.g. /dashboard
        #[arg(default_value = "/dashboard")]
        path: String,
    },

    /// Manage tasks
    Tasks {
        #[command(subcommand)]
        command: TaskCommands,
    },
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List all tasks
    List,

    /// Add a task
    Add {
        /// Task text
        text: String,
    },

    /// Mark a task as done
    Done {
        /// Task id
        id: String,
    },

    /// Mark a task as not done
    Undo {
        /// Task id
        id: String,
    },

    /// Change a task's text
    Edit {
        /// Task id
        id: String,

        /// New text
        text: String,
    },

    /// Delete a task
    Remove {
        /// Task id
        id: String,
    },
}

impl Commands {
    pub async fn execute(self, client: &TodoClient) -> Result<()> {
        match self {
            Commands::Login {
                email,
                password,
                remember,
            } => {
                let response = client.login(&email, &password, remember).await?;
                info!(user_id = %response.user_id, remember, "Login completed");
                println!("{}", non_empty(&response.message, "Logged in"));
                if remember && response.token.is_none() {
                    println!("Server did not issue a persistent token; the session ends with this run.");
                }
            }
            Commands::Register { email, password } => {
                let response = client.register(&email, &password).await?;
                println!("{} ({})", non_empty(&response.message, "Registered"), response.user_id);
            }
            Commands::Logout => {
                client.logout().await?;
                println!("Logged out");
            }
            Commands::Session => {
                // Restore first: a fresh process has no session cookie yet
                let outcome = client.restore_session().await;
                info!(?outcome, "Session restore attempted");
                let status = client.session_status().await;
                match status {
                    Ok(status) if status.logged_in => match status.user {
                        Some(user) => println!("Logged in as {} ({})", user.email, user.id),
                        None => println!("Logged in"),
                    },
                    Ok(_) => println!("Not logged in"),
                    Err(e) if e.is_unauthorized() => println!("Not logged in"),
                    Err(e) => return Err(e).context("session check failed"),
                }
            }
            Commands::Open { path } => {
                let cancel = client.cancellation().child_token();
                let guard = NavigationGuard::new(client.clone());
                match guard.before_each(&path, &cancel).await {
                    GuardDecision::Proceed => println!("{path}: allowed"),
                    GuardDecision::Redirect(target) => println!("{path}: redirected to {target}"),
                    GuardDecision::Abort => bail!("navigation to {path} was cancelled"),
                }
            }
            Commands::Tasks { command } => command.execute(client).await?,
        }

        Ok(())
    }
}

impl TaskCommands {
    async fn execute(self, client: &TodoClient) -> Result<()> {
        // Re-establish the session cookie from the stored token, if any
        client.restore_session().await;

        match self {
            TaskCommands::List => {
                let tasks = client.list_tasks().await?;
                if tasks.is_empty() {
                    println!("No tasks");
                }
                for task in &tasks {
                    println!("{}", format_task(task));
                }
            }
            TaskCommands::Add { text } => {
                let task = client.create_task(&text).await?;
                println!("{}", format_task(&task));
            }
            TaskCommands::Done { id } => {
                let task = client.update_task(&id, &TaskUpdate::done(true)).await?;
                println!("{}", format_task(&task));
            }
            TaskCommands::Undo { id } => {
                let task = client.update_task(&id, &TaskUpdate::done(false)).await?;
                println!("{}", format_task(&task));
            }
            TaskCommands::Edit { id, text } => {
                let task = client.update_task(&id, &TaskUpdate::text(text)).await?;
                println!("{}", format_task(&task));
            }
            TaskCommands::Remove { id } => {
                client.delete_task(&id).await?;
                println!("Deleted {id}");
            }
        }
        Ok(())
    }
}

fn format_task(task: &Task) -> String {
    let mark = if task.done { 'x' } else { ' ' };
    format!("[{mark}] {}  {}", task.id, task.text)
}

fn non_empty<'a>(message: &'a str, fallback: &'a str) -> &'a str {
    if message.is_empty() { fallback } else { message }
}

/// Cancel `token` on Ctrl-C
pub fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, cancelling in-flight requests");
            token.cancel();
        }
    });
}
