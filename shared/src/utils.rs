//! # Shared Utility Functions
//!
//! Address formatting for display labels (wallet button, history rows).

/// Format a wallet address by showing the first `prefix_len` and last
/// `suffix_len` characters with an ellipsis in between.
///
/// If the address is too short to truncate meaningfully it is returned
/// as-is. Solana addresses are base58 ASCII, so byte slicing is safe.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL";
/// assert_eq!(format_address(addr, 4, 4), "8W6Q...JKAL");
/// assert_eq!(format_address("short", 4, 4), "short");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    if address_len <= prefix_len + suffix_len
        || prefix_len >= address_len
        || suffix_len >= address_len
    {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Format a wallet address with the default 4-character prefix and suffix,
/// matching the connect-wallet button label.
pub fn truncate_address(address: &str) -> String {
    format_address(address, 4, 4)
}
