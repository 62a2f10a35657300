use crc32fast::Hasher;

/// CRC-32 (IEEE, reflected 0xEDB88320, as used by zlib) of `data`, stored the
/// way the DVPL footer stores it: the 32 CRC bits reinterpreted as `i32`.
///
/// `0xCBF43926` (the check value for `"123456789"`) becomes `-873187034`.
pub fn crc32(data: &[u8]) -> i32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize() as i32
}
