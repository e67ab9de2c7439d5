/// Builds a full Helix API URL from a path suffix, e.g.
/// `twitch_helix!("/users")` expands to `"https://api.twitch.tv/helix/users"`.
macro_rules! twitch_helix {
    ($path:expr) => {
        concat!("https://api.twitch.tv/helix", $path)
    };
}
