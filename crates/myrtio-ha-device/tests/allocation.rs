//! Allocation tracking for the full device lifecycle.
//!
//! Runs without the test harness so no other thread allocates while the
//! counters are armed.

mod common;

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use common::FakeLink;
use myrtio_ha_device::{DeviceContext, HaDevice};

struct TrackingAllocator;

static TRACKING: AtomicBool = AtomicBool::new(false);
static ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);
static DEALLOCATIONS: AtomicUsize = AtomicUsize::new(0);

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if TRACKING.load(Ordering::SeqCst) {
            ALLOCATIONS.fetch_add(1, Ordering::SeqCst);
        }
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        if TRACKING.load(Ordering::SeqCst) {
            DEALLOCATIONS.fetch_add(1, Ordering::SeqCst);
        }
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

fn lifecycle(link: &mut FakeLink) {
    let mut device: HaDevice<'static> = HaDevice::from_bytes(&[0xAB, 0x01, 0x02, 0x03]);
    device.set_name("Desk Lamp");
    device.set_manufacturer("MyrtIO");
    device.enable_extended_unique_ids();
    assert!(device.owns_unique_id());
    assert!(device.try_enable_shared_availability());

    let mut buf = [0u8; 128];
    assert!(device.serialize_device(&mut buf).is_ok());
    let entity_id: heapless::String<32> = device.entity_unique_id("temperature").unwrap();
    assert_eq!(entity_id.as_str(), "ab010203_temperature");

    device.set_availability(false, link);
    device.publish_availability(link);
    drop(device);
}

fn main() {
    // Disconnected: the fake link allocates when it records a publish.
    let mut link = FakeLink::disconnected();

    TRACKING.store(true, Ordering::SeqCst);
    lifecycle(&mut link);
    TRACKING.store(false, Ordering::SeqCst);

    let allocations = ALLOCATIONS.load(Ordering::SeqCst);
    let deallocations = DEALLOCATIONS.load(Ordering::SeqCst);
    assert_eq!(allocations, deallocations, "device lifecycle leaked memory");
    assert_eq!(allocations, 0, "device lifecycle allocated on the heap");
    assert!(link.published.is_empty());
}
