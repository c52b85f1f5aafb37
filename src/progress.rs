//! Progress bar display for store reconciliation

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for the layer-by-layer reconciliation pass
pub struct ProgressDisplay {
    /// One tick per store layer
    layer_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with the total layer count
    pub fn new(total_layers: u64) -> Self {
        let layer_style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-");

        let layer_pb = ProgressBar::new(total_layers);
        layer_pb.set_style(layer_style);

        Self { layer_pb }
    }

    /// Update to show the layer currently being reconciled
    pub fn update_layer(&self, layer_name: &str) {
        self.layer_pb.set_message(layer_name.to_string());
    }

    /// Mark the current layer finished
    pub fn inc_layer(&self) {
        self.layer_pb.inc(1);
    }

    /// Finish the bar
    pub fn finish(&self) {
        self.layer_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.layer_pb.abandon();
    }
}
