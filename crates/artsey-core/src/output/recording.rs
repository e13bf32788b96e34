// Artsey Recording Output
// Collects emissions in memory

use std::io;

use crate::output::OutputSink;
use crate::resolver::Emission;

/// Keeps every emission it receives, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    emissions: Vec<Emission>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emissions(&self) -> &[Emission] {
        &self.emissions
    }

    /// All literal output concatenated, as it would appear on a console
    pub fn text(&self) -> String {
        self.emissions
            .iter()
            .filter_map(|e| match e {
                Emission::Literal(text) => Some(text.as_str()),
                Emission::LayerSwitched { .. } => None,
            })
            .collect()
    }

    /// Target layers of every layer switch, in order
    pub fn layer_switches(&self) -> Vec<&str> {
        self.emissions
            .iter()
            .filter_map(|e| match e {
                Emission::LayerSwitched { to, .. } => Some(to.as_str()),
                Emission::Literal(_) => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.emissions.clear();
    }
}

impl OutputSink for RecordingSink {
    fn emit(&mut self, emission: &Emission) -> io::Result<()> {
        self.emissions.push(emission.clone());
        Ok(())
    }
}
