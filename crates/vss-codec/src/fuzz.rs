// Author: Lukas Bower
// Purpose: Provide a fuzz corpus harness for VSS native record decoding.

//! Fuzz corpus harness for record decoding.

use crate::RecordIter;

/// Exercise decoder paths on arbitrary corpus bytes.
pub fn fuzz_decode(bytes: &[u8]) {
    for record in RecordIter::new(bytes) {
        if record.is_err() {
            break;
        }
    }
}
