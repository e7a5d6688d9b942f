use std::path::PathBuf;

use clap::Parser;
use mailverify_lib::Invocation;

pub const DEFAULT_CONFIG: &str = "/etc/mailverify.toml";

#[derive(Parser, Debug)]
#[command(
    name = "mailverify-cli",
    about = "Address verification callout for a mail relay (LDAP lookup)",
    disable_version_flag = true
)]
pub struct Cli {
    /// affiche la version et quitte (aucun accès réseau)
    #[arg(long)]
    pub version: bool,

    /// fichier de configuration TOML
    #[arg(long, env = "MAILVERIFY_CONFIG", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// filtre de logs (stderr), ex. `debug` ou `mailverify_lib=trace`
    #[arg(long)]
    pub log_level: Option<String>,

    /// adresse à vérifier, puis les champs ajoutés par le relais
    /// (expéditeur, IP client, domaine, auth...)
    #[arg(
        value_name = "ADDRESS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub argv: Vec<String>,
}

impl Cli {
    /// `None` when neither `--version` nor an address was given.
    ///
    /// The first positional is always the address, even when it starts with
    /// `-`; `--version` only counts when no address follows.
    pub fn invocation(&self) -> Option<Invocation> {
        match self.argv.split_first() {
            Some((address, context)) => Some(Invocation::Verify {
                address: address.clone(),
                context: context.to_vec(),
            }),
            None if self.version => Some(Invocation::Version),
            None => None,
        }
    }
}
