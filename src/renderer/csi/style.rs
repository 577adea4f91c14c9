//! SGR dispatch into the rendition engine

use crate::renderer::Renderer;
use crate::tokenizer::ControlFunction;

impl Renderer {
    pub(crate) fn handle_csi_style(&mut self, function: &ControlFunction) {
        if function.private {
            // private-marker SGR forms are terminal-query extensions with
            // no rendition effect
            self.other_codes += 1;
            return;
        }
        self.rendition.apply_sgr(&function.params);
        self.emitter.style_change(&self.rendition);
    }
}
