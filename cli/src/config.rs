//! CLI configuration: `.env` file, environment variables, then flags.

use clap::Args;
use helix_client::Token;
use helix_client::api::HELIX_BASE;

/// Credentials and endpoint settings shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct AuthArgs {
    /// Application client ID
    #[arg(long, env = "HELIX_CLIENT_ID", global = true, default_value = "")]
    pub client_id: String,

    /// Access token used for Helix requests
    #[arg(long, env = "HELIX_ACCESS_TOKEN", global = true, default_value = "", hide_env_values = true)]
    pub access_token: String,

    /// Space-separated scopes granted to the access token
    #[arg(long, env = "HELIX_SCOPES", global = true, default_value = "")]
    pub scopes: String,

    /// User ID owning the access token. Default broadcaster and user for `create`
    #[arg(long, env = "HELIX_USER_ID", global = true)]
    pub user_id: Option<String>,

    /// Helix API base URL
    #[arg(long, env = "HELIX_BASE_URL", global = true, default_value = HELIX_BASE)]
    pub base_url: String,
}

/// Validated runtime configuration for commands that talk to Helix.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub client_id: String,
    pub base_url: String,
    pub token: Token,
}

impl CliConfig {
    pub fn from_args(args: &AuthArgs) -> Result<Self, anyhow::Error> {
        let client_id = args.client_id.trim();
        if client_id.is_empty() {
            anyhow::bail!("client ID is required (--client-id or HELIX_CLIENT_ID)");
        }
        let access_token = args.access_token.trim();
        if access_token.is_empty() {
            anyhow::bail!("access token is required (--access-token or HELIX_ACCESS_TOKEN)");
        }
        let base_url = {
            let url = args.base_url.trim();
            if url.is_empty() { HELIX_BASE.to_string() } else { url.to_string() }
        };

        Ok(Self {
            client_id: client_id.to_string(),
            base_url,
            token: Token {
                access_token: access_token.to_string(),
                scope: args.scopes.trim().to_string(),
                user_id: args.user_id.clone().filter(|id| !id.is_empty()),
            },
        })
    }
}

/// Load the first `.env` file found near the working directory.
///
/// Returns the path that was loaded. Must run before argument parsing so
/// that clap sees the variables.
pub fn load_dotenv() -> Option<&'static str> {
    let candidates = [".env", "../.env"];
    candidates
        .into_iter()
        .find(|path| dotenvy::from_filename(path).is_ok())
}
