/// An empty password is the same as no password.
pub fn active_password(password: Option<&str>) -> Option<&str> {
    password.filter(|p| !p.is_empty())
}

/// XOR data in place with the password's bytes, repeated to the length of the data.
/// Running it twice with the same password restores the data. Without a password this does
/// nothing.
pub fn xor_stream(data: &mut [u8], password: Option<&str>) {
    if let Some(key) = active_password(password) {
        data.iter_mut()
            .zip(key.as_bytes().iter().cycle())
            .for_each(|(byte, k)| *byte ^= k);
    }
}
