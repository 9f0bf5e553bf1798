//! C FFI bindings for mobile platforms

use core::slice;

use crate::params::{DIGEST_SIZE, UUID_SIZE, UUID_TEXT_LEN};
use crate::{Case, Generator, Sha1, Uuid, encode, generate_named, parse_chars};

/// Opaque hasher handle for FFI
pub struct UkSha1 {
    inner: Sha1,
}

/// Create a new SHA-1 hasher
/// Returns a pointer to the hasher (caller must free with uuidkit_sha1_free)
#[unsafe(no_mangle)]
pub extern "C" fn uuidkit_sha1_new() -> *mut UkSha1 {
    let hasher = Box::new(UkSha1 { inner: Sha1::new() });
    Box::into_raw(hasher)
}

/// Free a hasher instance
#[unsafe(no_mangle)]
pub extern "C" fn uuidkit_sha1_free(hasher: *mut UkSha1) {
    if !hasher.is_null() {
        unsafe {
            let _ = Box::from_raw(hasher);
        }
    }
}

/// Feed bytes into the hasher
#[unsafe(no_mangle)]
pub extern "C" fn uuidkit_sha1_update(hasher: *mut UkSha1, input: *const u8, input_len: usize) {
    if hasher.is_null() || input.is_null() {
        return;
    }

    unsafe {
        let hasher = &mut *hasher;
        hasher.inner.update(slice::from_raw_parts(input, input_len));
    }
}

/// Finish the hash
/// - output: pointer to a 20-byte buffer for the digest
#[unsafe(no_mangle)]
pub extern "C" fn uuidkit_sha1_finish(hasher: *mut UkSha1, output: *mut u8) {
    if hasher.is_null() || output.is_null() {
        return;
    }

    unsafe {
        let hasher = &mut *hasher;
        let digest = hasher.inner.finish();
        slice::from_raw_parts_mut(output, DIGEST_SIZE).copy_from_slice(digest.as_bytes());
    }
}

/// Generate a random (v4) UUID into a 16-byte buffer
#[unsafe(no_mangle)]
pub extern "C" fn uuidkit_generate(output: *mut u8) {
    if output.is_null() {
        return;
    }

    let id = Generator::new().generate();
    unsafe {
        slice::from_raw_parts_mut(output, UUID_SIZE).copy_from_slice(id.as_bytes());
    }
}

/// Generate a name-based (v5) UUID
/// - namespace: pointer to the 16 namespace bytes
/// - name/name_len: raw name bytes (may be empty)
/// - output: pointer to a 16-byte buffer
#[unsafe(no_mangle)]
pub extern "C" fn uuidkit_generate_named(
    namespace: *const u8,
    name: *const u8,
    name_len: usize,
    output: *mut u8,
) {
    if namespace.is_null() || output.is_null() || (name.is_null() && name_len != 0) {
        return;
    }

    unsafe {
        let mut ns = [0u8; UUID_SIZE];
        ns.copy_from_slice(slice::from_raw_parts(namespace, UUID_SIZE));
        let name = if name_len == 0 {
            &[][..]
        } else {
            slice::from_raw_parts(name, name_len)
        };
        let id = generate_named(&Uuid::from_bytes(ns), name);
        slice::from_raw_parts_mut(output, UUID_SIZE).copy_from_slice(id.as_bytes());
    }
}

/// Parse UTF-8 text into a 16-byte buffer
/// Returns false (and leaves output untouched) when the text is not a UUID
#[unsafe(no_mangle)]
pub extern "C" fn uuidkit_parse(text: *const u8, text_len: usize, output: *mut u8) -> bool {
    if text.is_null() || output.is_null() {
        return false;
    }

    unsafe {
        let bytes = slice::from_raw_parts(text, text_len);
        let Ok(text) = core::str::from_utf8(bytes) else {
            return false;
        };
        match parse_chars(text.chars()) {
            Ok(id) => {
                slice::from_raw_parts_mut(output, UUID_SIZE).copy_from_slice(id.as_bytes());
                true
            }
            Err(_) => false,
        }
    }
}

/// Write the 36-character canonical form (uppercase, not NUL-terminated)
#[unsafe(no_mangle)]
pub extern "C" fn uuidkit_format(input: *const u8, output: *mut u8) {
    if input.is_null() || output.is_null() {
        return;
    }

    unsafe {
        let mut bytes = [0u8; UUID_SIZE];
        bytes.copy_from_slice(slice::from_raw_parts(input, UUID_SIZE));
        let text = encode(&Uuid::from_bytes(bytes), Case::Upper);
        slice::from_raw_parts_mut(output, UUID_TEXT_LEN).copy_from_slice(&text);
    }
}
