mod playback;
mod recording;
mod settings;
mod stop_flags;
