pub mod voice_guard;
