// Log-text heuristics for the messaging integration's connection state

use crate::config::LogsConfig;
use crate::models::ConnectionStatus;

/// Maps a tail of log text to a connection status. Swappable so the HTTP layer never
/// depends on exact log phrasing.
pub trait ConnectionClassifier: Send + Sync {
    fn classify(&self, tail: &str) -> ConnectionStatus;
}

/// Ordered substring precedence: no subsystem marker, then ready/message, then restart.
#[derive(Debug, Clone)]
pub struct MarkerRules {
    pub subsystem_marker: String,
    pub ready_markers: Vec<String>,
    pub restart_markers: Vec<String>,
    pub message_marker: String,
}

impl MarkerRules {
    pub fn from_config(config: &LogsConfig) -> Self {
        Self {
            subsystem_marker: config.subsystem_marker.clone(),
            ready_markers: config.ready_markers.clone(),
            restart_markers: config.restart_markers.clone(),
            message_marker: config.message_marker.clone(),
        }
    }
}

impl Default for MarkerRules {
    fn default() -> Self {
        Self::from_config(&LogsConfig::default())
    }
}

impl ConnectionClassifier for MarkerRules {
    fn classify(&self, tail: &str) -> ConnectionStatus {
        if !tail.contains(&self.subsystem_marker) {
            return ConnectionStatus::Initializing;
        }
        let ready = self.ready_markers.iter().any(|m| tail.contains(m.as_str()))
            || tail.contains(&self.message_marker);
        if ready {
            return ConnectionStatus::Connected;
        }
        if self.restart_markers.iter().any(|m| tail.contains(m.as_str())) {
            return ConnectionStatus::Reconnecting;
        }
        ConnectionStatus::Initializing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subsystem_marker_is_initializing() {
        let rules = MarkerRules::default();
        assert_eq!(
            rules.classify("gateway listening on :18789\nws client ready\n"),
            ConnectionStatus::Initializing
        );
        assert_eq!(rules.classify(""), ConnectionStatus::Initializing);
    }

    #[test]
    fn ready_marker_is_connected() {
        let rules = MarkerRules::default();
        assert_eq!(
            rules.classify("[feishu] ws client ready"),
            ConnectionStatus::Connected
        );
    }

    #[test]
    fn received_message_wins_over_restart_in_any_order() {
        let rules = MarkerRules::default();
        let before = "[feishu] auto-restart in 5s\n[feishu] Received from ou_123\n";
        let after = "[feishu] Received from ou_123\n[feishu] auto-restart in 5s\n";
        assert_eq!(rules.classify(before), ConnectionStatus::Connected);
        assert_eq!(rules.classify(after), ConnectionStatus::Connected);
    }

    #[test]
    fn restart_only_is_reconnecting() {
        let rules = MarkerRules::default();
        assert_eq!(
            rules.classify("[feishu] connection lost, auto-restart scheduled"),
            ConnectionStatus::Reconnecting
        );
    }

    #[test]
    fn marker_without_decisive_text_is_initializing() {
        let rules = MarkerRules::default();
        assert_eq!(
            rules.classify("[feishu] starting provider"),
            ConnectionStatus::Initializing
        );
    }
}
