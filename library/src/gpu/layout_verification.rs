use crate::gpu::shader_program::{DeclaredType, UniformBlockInfo};
use crate::serialization::uniform_block_element::UniformBlockElement;
use derive_more::Display;
use log::warn;

/// Disagreement between a host record and the block the shader declares.
///
/// A mismatch never stops construction: the device would happily read the
/// bytes anyway, so the best we can do is make the problem loud.
#[derive(Clone, Debug, Display, PartialEq)]
pub enum LayoutMismatch {
    #[display("block '{block}' is not an array of structs but {declared}")]
    NotStructArray {
        block: String,
        declared: String,
    },
    #[display("block '{block}' declares {declared} elements, host capacity is {host}")]
    Length {
        block: String,
        declared: u32,
        host: usize,
    },
    #[display("block '{block}' element stride is {declared} bytes, host record is {host} bytes")]
    Stride {
        block: String,
        declared: u32,
        host: usize,
    },
    #[display("block '{block}' spans {declared} bytes, host buffer is {host} bytes")]
    BlockSize {
        block: String,
        declared: u32,
        host: usize,
    },
    #[display("member '{member}' of block '{block}' is at {declared}, host field is at {host}")]
    MemberOffset {
        block: String,
        member: String,
        declared: u32,
        host: usize,
    },
    #[display("host field '{member}' is absent from block '{block}'")]
    MissingMember {
        block: String,
        member: String,
    },
    #[display("size scalar '{block}' is declared as {declared}, expected u32")]
    SizeScalarType {
        block: String,
        declared: String,
    },
}

#[must_use]
pub fn verify_element_layout<T: UniformBlockElement>(block: &UniformBlockInfo, capacity: usize) -> Vec<LayoutMismatch> {
    let DeclaredType::StructArray { length, stride, members } = &block.declared_type else {
        return vec![LayoutMismatch::NotStructArray {
            block: block.name.clone(),
            declared: describe(&block.declared_type),
        }];
    };

    let mut mismatches = Vec::new();

    if *length as usize != capacity {
        mismatches.push(LayoutMismatch::Length { block: block.name.clone(), declared: *length, host: capacity });
    }

    if *stride as usize != size_of::<T>() {
        mismatches.push(LayoutMismatch::Stride { block: block.name.clone(), declared: *stride, host: size_of::<T>() });
    }

    let host_size = capacity * size_of::<T>();
    if block.size_bytes as usize != host_size {
        mismatches.push(LayoutMismatch::BlockSize { block: block.name.clone(), declared: block.size_bytes, host: host_size });
    }

    for (field, host_offset) in T::FIELD_OFFSETS {
        match members.iter().find(|member| member.name == *field) {
            Some(member) if member.offset as usize != *host_offset => {
                mismatches.push(LayoutMismatch::MemberOffset {
                    block: block.name.clone(),
                    member: field.to_string(),
                    declared: member.offset,
                    host: *host_offset,
                });
            }
            Some(_) => {}
            None => {
                mismatches.push(LayoutMismatch::MissingMember { block: block.name.clone(), member: field.to_string() });
            }
        }
    }

    mismatches
}

#[must_use]
pub fn verify_size_scalar(block: &UniformBlockInfo) -> Vec<LayoutMismatch> {
    match &block.declared_type {
        DeclaredType::U32 => Vec::new(),
        other => vec![LayoutMismatch::SizeScalarType { block: block.name.clone(), declared: describe(other) }],
    }
}

pub(crate) fn report(mismatches: &[LayoutMismatch]) {
    for mismatch in mismatches {
        warn!("layout mismatch: {}", mismatch);
    }
}

#[must_use]
fn describe(declared: &DeclaredType) -> String {
    match declared {
        DeclaredType::StructArray { length, .. } => format!("array of {length} structs"),
        DeclaredType::U32 => "u32".to_string(),
        DeclaredType::Other(what) => what.clone(),
    }
}
