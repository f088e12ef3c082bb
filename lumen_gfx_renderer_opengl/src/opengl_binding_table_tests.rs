//! Unit tests for SetBindingInfo

use super::*;
use std::num::NonZeroU32;

fn program() -> ProgramHandle {
    ProgramHandle(NonZeroU32::new(7).unwrap())
}

fn sample_table() -> SetBindingInfo {
    let mut builder = SetBindingInfoBuilder::new(5);
    builder
        .bind(0, SlotBinding::Uniform(UniformBinding { program: program(), block_index: 2, block_size: 64 }))
        .bind(1, SlotBinding::Texture(TextureBindingSlot { relative_index: 0, uniform_location: 3 }))
        .bind(2, SlotBinding::Sampler(SamplerBindingSlot { texture_indices: vec![0] }))
        .bind(3, SlotBinding::StorageBuffer(StorageBufferBinding { binding: 4 }));
    // slot 4 stays unbound
    builder.build()
}

#[test]
fn test_lookups_by_kind() {
    let table = sample_table();

    assert_eq!(table.slot_count(), 5);
    assert_eq!(table.uniform_binding(0).map(|b| b.block_size), Some(64));
    assert_eq!(table.texture_binding(1).map(|b| b.uniform_location), Some(3));
    assert_eq!(table.sampler_binding(2).map(|b| b.texture_indices.clone()), Some(vec![0]));
    assert_eq!(table.storage_buffer_binding(3).map(|b| b.binding), Some(4));
    assert_eq!(table.slot(4), Some(&SlotBinding::None));
}

#[test]
fn test_kinds_are_exclusive_per_slot() {
    let table = sample_table();

    assert!(table.texture_binding(0).is_none());
    assert!(table.sampler_binding(0).is_none());
    assert!(table.storage_buffer_binding(0).is_none());
    assert!(table.uniform_binding(1).is_none());
    assert!(table.uniform_binding(4).is_none());
}

#[test]
fn test_counts_computed_at_seal_time() {
    let table = sample_table();
    assert_eq!(table.uniform_buffer_count(), 1);
    assert_eq!(table.storage_buffer_count(), 1);
}

#[test]
fn test_out_of_range_lookups_return_none() {
    let table = sample_table();
    assert!(table.slot(5).is_none());
    assert!(table.uniform_binding(99).is_none());
    assert!(table.texture_binding(u32::MAX).is_none());
}

#[test]
fn test_rebinding_replaces_previous_binding() {
    let mut builder = SetBindingInfoBuilder::new(1);
    builder.bind(0, SlotBinding::StorageBuffer(StorageBufferBinding { binding: 0 }));
    builder.bind(0, SlotBinding::Texture(TextureBindingSlot { relative_index: 1, uniform_location: -1 }));
    builder.bind(3, SlotBinding::StorageBuffer(StorageBufferBinding { binding: 9 }));
    let table = builder.build();

    assert_eq!(table.slot_count(), 1);
    assert_eq!(table.storage_buffer_count(), 0);
    assert_eq!(table.texture_binding(0).map(|b| b.relative_index), Some(1));
}

#[test]
fn test_empty_set() {
    let table = SetBindingInfoBuilder::new(0).build();
    assert_eq!(table.slot_count(), 0);
    assert_eq!(table.uniform_buffer_count(), 0);
    assert!(table.slot(0).is_none());
}
