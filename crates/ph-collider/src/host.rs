use crate::shape::ColliderSpec;

/// Implemented by the engine layer. Calls for the same handle must not
/// overlap; the pipeline always removes before it attaches.
pub trait ColliderHost {
    type Handle: Copy;

    fn remove_colliders(&mut self, handle: Self::Handle);

    fn attach_collider(&mut self, handle: Self::Handle, spec: ColliderSpec);
}

pub fn replace_collider<H: ColliderHost + ?Sized>(
    host: &mut H,
    handle: H::Handle,
    spec: ColliderSpec,
) {
    host.remove_colliders(handle);
    host.attach_collider(handle, spec);
}
