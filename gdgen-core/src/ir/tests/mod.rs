mod naming;

use super::{NameSanitizer, ReservedNames};

const RESERVED: ReservedNames = ReservedNames::new(&[
    "Container", "Resource", "Image", "Time", "OS", "Node", "Object", "Thread",
]);

fn sanitizer() -> NameSanitizer {
    NameSanitizer::new(RESERVED, "PlayFab").unwrap()
}
