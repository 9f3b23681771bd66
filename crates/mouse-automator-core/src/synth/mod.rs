pub(crate) mod enigo_synth;
mod pointer_synth;

pub use {
    enigo_synth::{EnigoSynth, EnigoSynthFactory},
    pointer_synth::{PointerSynth, SynthFactory},
};
