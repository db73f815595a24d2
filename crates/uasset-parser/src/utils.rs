//! Small helpers shared by decoders.

/// Round `value` up to the next multiple of `alignment`.
///
/// `alignment` must be a power of two.
///
/// # Example
/// ```
/// use uasset_parser::utils::align;
///
/// assert_eq!(align(13, 4), 16);
/// assert_eq!(align(16, 4), 16);
/// ```
pub fn align(value: u64, alignment: u64) -> u64 {
    debug_assert!(alignment.is_power_of_two());
    (value + alignment - 1) & !(alignment - 1)
}
