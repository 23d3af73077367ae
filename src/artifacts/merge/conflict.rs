//! Conflict markers written into the working directory

const OURS_MARKER: &[u8] = b"<<<<<<< HEAD\n";
const SEPARATOR: &[u8] = b"=======\n";
const THEIRS_MARKER_PREFIX: &[u8] = b">>>>>>> ";

/// Wrap both sides of a conflicting file in markers for manual resolution
///
/// ```text
/// <<<<<<< HEAD
/// <ours>
/// =======
/// <theirs>
/// >>>>>>> <source branch>
/// ```
pub fn conflict_block(ours: &[u8], theirs: &[u8], source_branch: &str) -> Vec<u8> {
    let mut block = Vec::with_capacity(ours.len() + theirs.len() + 64);

    block.extend_from_slice(OURS_MARKER);
    push_terminated(&mut block, ours);
    block.extend_from_slice(SEPARATOR);
    push_terminated(&mut block, theirs);
    block.extend_from_slice(THEIRS_MARKER_PREFIX);
    block.extend_from_slice(source_branch.as_bytes());
    block.push(b'\n');

    block
}

// markers must start on their own line
fn push_terminated(block: &mut Vec<u8>, content: &[u8]) {
    block.extend_from_slice(content);
    if !content.is_empty() && !content.ends_with(b"\n") {
        block.push(b'\n');
    }
}
