pub mod fullscreen;
