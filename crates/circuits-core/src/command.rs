// ── Connect-command building ──
//
// Maps a resolved device onto a shell command template and fills in the
// `%username%` and `%hostname%` placeholders. No quoting or escaping is
// applied: templates are trusted configuration.

use tracing::debug;

use crate::config::ConnectConfig;
use crate::error::CoreError;
use crate::model::Device;

const USERNAME_PLACEHOLDER: &str = "%username%";
const HOSTNAME_PLACEHOLDER: &str = "%hostname%";

/// A fully substituted command line plus how it was derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectCommand {
    /// The command line handed to the shell.
    pub line: String,
    /// Effective username substituted for `%username%`.
    pub user: String,
    /// Effective protocol after fallback and `ssh` → `ssh1` normalization.
    pub protocol: String,
    /// Protocol key whose template was used.
    pub template_key: String,
}

/// Builds connect commands from a `ConnectConfig`.
pub struct CommandBuilder<'a> {
    config: &'a ConnectConfig,
}

impl<'a> CommandBuilder<'a> {
    pub fn new(config: &'a ConnectConfig) -> Self {
        Self { config }
    }

    /// Effective protocol: the device's own, else the fallback, with a
    /// bare `ssh` normalized to `ssh1`.
    pub fn effective_protocol(&self, device: &Device) -> String {
        let proto = device.protocol().unwrap_or(&self.config.fallback_proto);
        if proto == "ssh" {
            "ssh1".to_owned()
        } else {
            proto.to_owned()
        }
    }

    /// Effective username: the device's override, else the fallback.
    pub fn effective_user(&self, device: &Device) -> String {
        device
            .user_override()
            .unwrap_or(&self.config.fallback_user)
            .to_owned()
    }

    /// Build the command line for `device`.
    ///
    /// The template is looked up by the protocol exactly as stored on the
    /// device first, then by the effective protocol. A stored `ssh` thus
    /// uses a `commands.ssh` template when one is configured and the
    /// `ssh1` template otherwise.
    pub fn build(&self, device: &Device) -> Result<ConnectCommand, CoreError> {
        let user = self.effective_user(device);
        let protocol = self.effective_protocol(device);

        let stored = device.proto.as_deref().unwrap_or_default();
        let (template_key, template) = match self.config.template(stored) {
            Some(t) => (stored, t),
            None => match self.config.template(&protocol) {
                Some(t) => (protocol.as_str(), t),
                None => {
                    return Err(CoreError::MissingTemplate {
                        protocol: protocol.clone(),
                    });
                }
            },
        };

        let line = template
            .replace(USERNAME_PLACEHOLDER, &user)
            .replace(HOSTNAME_PLACEHOLDER, &device.ip);

        debug!(device = %device.full_name, %protocol, template = template_key, "built command");

        Ok(ConnectCommand {
            line,
            user,
            template_key: template_key.to_owned(),
            protocol,
        })
    }
}
