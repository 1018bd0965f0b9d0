use crate::config::STATIC_BUFFERS_BIND_GROUP;
use crate::gpu::binding_slot_allocator::BindingSlot;
use log::info;
use naga::{AddressSpace, ArraySize, GlobalVariable, Handle, Module, ResourceBinding, Scalar, StructMember, TypeInner};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ShaderInterfaceError {
    #[error("failed to parse shader '{label}': {what}")]
    ParseFailed {
        label: String,
        what: String,
    },
    #[error("shader '{label}' declares no global named '{name}'")]
    BlockNotFound {
        label: String,
        name: String,
    },
    #[error("global '{name}' of shader '{label}' is not in the uniform address space")]
    NotUniform {
        label: String,
        name: String,
    },
    #[error("binding {slot} of group {group} is already taken by '{occupant}'")]
    BindingConflict {
        group: u32,
        slot: BindingSlot,
        occupant: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeclaredMember {
    pub name: String,
    pub offset: u32,
}

/// What the shader says lives behind a uniform global.
#[derive(Clone, Debug, PartialEq)]
pub enum DeclaredType {
    StructArray {
        length: u32,
        stride: u32,
        members: Vec<DeclaredMember>,
    },
    U32,
    Other(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct UniformBlockInfo {
    pub name: String,
    pub size_bytes: u32,
    pub declared_type: DeclaredType,
}

/// A WGSL program kept as a naga module so uniform blocks can be looked up
/// by name and moved to allocator-issued binding slots before compilation.
pub struct ShaderProgram {
    label: String,
    module: Module,
    bound_blocks: Vec<(BindingSlot, String)>,
}

impl ShaderProgram {
    pub fn from_wgsl(label: &str, source: &str) -> Result<Self, ShaderInterfaceError> {
        let module = naga::front::wgsl::parse_str(source)
            .map_err(|error| ShaderInterfaceError::ParseFailed {
                label: label.to_string(),
                what: error.emit_to_string(source),
            })?;

        Ok(Self { label: label.to_string(), module, bound_blocks: Vec::new() })
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn bound_slots(&self) -> impl Iterator<Item = BindingSlot> + '_ {
        self.bound_blocks.iter().map(|(slot, _)| *slot)
    }

    pub fn uniform_block(&self, name: &str) -> Result<UniformBlockInfo, ShaderInterfaceError> {
        let handle = self.find_uniform(name)?;
        Ok(self.describe(name, &self.module.global_variables[handle]))
    }

    pub fn bind_uniform_block(&mut self, name: &str, slot: BindingSlot) -> Result<UniformBlockInfo, ShaderInterfaceError> {
        let handle = self.find_uniform(name)?;
        let target = ResourceBinding { group: STATIC_BUFFERS_BIND_GROUP, binding: slot.0 };

        // declared bindings of blocks that have not moved yet are about to be replaced
        let occupant = self.bound_blocks.iter()
            .find(|(bound_slot, bound_name)| *bound_slot == slot && bound_name != name);
        if let Some((_, bound_name)) = occupant {
            return Err(ShaderInterfaceError::BindingConflict {
                group: STATIC_BUFFERS_BIND_GROUP,
                slot,
                occupant: bound_name.clone(),
            });
        }

        self.module.global_variables.get_mut(handle).binding = Some(target);
        self.bound_blocks.push((slot, name.to_string()));
        info!("shader '{}': block '{}' bound to group {}, slot {}", self.label, name, STATIC_BUFFERS_BIND_GROUP, slot);

        Ok(self.describe(name, &self.module.global_variables[handle]))
    }

    fn find_uniform(&self, name: &str) -> Result<Handle<GlobalVariable>, ShaderInterfaceError> {
        let (handle, variable) = self.module.global_variables.iter()
            .find(|(_, variable)| variable.name.as_deref() == Some(name))
            .ok_or_else(|| ShaderInterfaceError::BlockNotFound { label: self.label.clone(), name: name.to_string() })?;

        if variable.space != AddressSpace::Uniform {
            return Err(ShaderInterfaceError::NotUniform { label: self.label.clone(), name: name.to_string() });
        }
        Ok(handle)
    }

    #[must_use]
    fn describe(&self, name: &str, variable: &GlobalVariable) -> UniformBlockInfo {
        let inner = &self.module.types[variable.ty].inner;
        UniformBlockInfo {
            name: name.to_string(),
            size_bytes: inner.size(self.module.to_ctx()),
            declared_type: self.declared_type(inner),
        }
    }

    #[must_use]
    fn declared_type(&self, inner: &TypeInner) -> DeclaredType {
        match inner {
            TypeInner::Scalar(scalar) if *scalar == Scalar::U32 => DeclaredType::U32,
            TypeInner::Array { base, size: ArraySize::Constant(length), stride } => {
                match &self.module.types[*base].inner {
                    TypeInner::Struct { members, .. } => {
                        let mut declared = Vec::new();
                        self.flatten_members(members, "", 0, &mut declared);
                        DeclaredType::StructArray { length: length.get(), stride: *stride, members: declared }
                    }
                    other => DeclaredType::Other(format!("array of {other:?}")),
                }
            }
            other => DeclaredType::Other(format!("{other:?}")),
        }
    }

    /// Lists members depth first; nested ones get dotted paths and offsets from the element start.
    fn flatten_members(&self, members: &[StructMember], prefix: &str, base_offset: u32, declared: &mut Vec<DeclaredMember>) {
        for member in members {
            let name = format!("{prefix}{}", member.name.as_deref().unwrap_or_default());
            let offset = base_offset + member.offset;
            declared.push(DeclaredMember { name: name.clone(), offset });

            if let TypeInner::Struct { members: nested, .. } = &self.module.types[member.ty].inner {
                self.flatten_members(nested, &format!("{name}."), offset, declared);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SPHERES_ONLY_SHADER: &str = r#"
        struct PrimitiveHeader {
            material_index: u32,
            origin: vec3f,
        }

        struct Sphere {
            header: PrimitiveHeader,
            radius_squared: f32,
        }

        @group(1) @binding(0) var<uniform> StaticWorldBufferSpheres: array<Sphere, 10>;
        @group(1) @binding(1) var<uniform> currentSizeSpheres: u32;
        @group(1) @binding(2) var<storage, read> notUniform: array<f32>;
    "#;

    #[must_use]
    fn make_system_under_test() -> ShaderProgram {
        ShaderProgram::from_wgsl("test", SPHERES_ONLY_SHADER).unwrap()
    }

    #[test]
    fn test_parse_failure() {
        let actual = ShaderProgram::from_wgsl("broken", "fn main( {");
        assert!(matches!(actual, Err(ShaderInterfaceError::ParseFailed { .. })));
    }

    #[test]
    fn test_struct_array_block() {
        let system_under_test = make_system_under_test();

        let actual = system_under_test.uniform_block("StaticWorldBufferSpheres").unwrap();

        assert_eq!(actual.size_bytes, 10 * 48);
        assert_eq!(actual.declared_type, DeclaredType::StructArray {
            length: 10,
            stride: 48,
            members: vec![
                DeclaredMember { name: "header".to_string(), offset: 0 },
                DeclaredMember { name: "header.material_index".to_string(), offset: 0 },
                DeclaredMember { name: "header.origin".to_string(), offset: 16 },
                DeclaredMember { name: "radius_squared".to_string(), offset: 32 },
            ],
        });
    }

    #[test]
    fn test_size_scalar_block() {
        let system_under_test = make_system_under_test();

        let actual = system_under_test.uniform_block("currentSizeSpheres").unwrap();

        assert_eq!(actual.size_bytes, 4);
        assert_eq!(actual.declared_type, DeclaredType::U32);
    }

    #[test]
    fn test_block_not_found() {
        let system_under_test = make_system_under_test();

        let actual = system_under_test.uniform_block("StaticWorldBufferCubes");

        assert_eq!(actual, Err(ShaderInterfaceError::BlockNotFound {
            label: "test".to_string(),
            name: "StaticWorldBufferCubes".to_string(),
        }));
    }

    #[test]
    fn test_not_uniform() {
        let system_under_test = make_system_under_test();

        let actual = system_under_test.uniform_block("notUniform");

        assert!(matches!(actual, Err(ShaderInterfaceError::NotUniform { .. })));
    }

    #[test]
    fn test_bind_moves_block_into_static_group() {
        let mut system_under_test = make_system_under_test();

        system_under_test.bind_uniform_block("StaticWorldBufferSpheres", BindingSlot(3)).unwrap();

        let (_, variable) = system_under_test.module().global_variables.iter()
            .find(|(_, variable)| variable.name.as_deref() == Some("StaticWorldBufferSpheres"))
            .unwrap();
        assert_eq!(variable.binding, Some(ResourceBinding { group: STATIC_BUFFERS_BIND_GROUP, binding: 3 }));
        assert_eq!(system_under_test.bound_slots().collect::<Vec<_>>(), vec![BindingSlot(3)]);
    }

    #[test]
    fn test_rebinding_over_declared_binding_of_unmoved_block() {
        let declared_in_static_group = SPHERES_ONLY_SHADER.replace("@group(1)", "@group(0)");
        let mut system_under_test = ShaderProgram::from_wgsl("test", &declared_in_static_group).unwrap();

        system_under_test.bind_uniform_block("StaticWorldBufferSpheres", BindingSlot(1)).unwrap();
        system_under_test.bind_uniform_block("currentSizeSpheres", BindingSlot(2)).unwrap();

        assert_eq!(system_under_test.bound_slots().collect::<Vec<_>>(), vec![BindingSlot(1), BindingSlot(2)]);
    }

    #[test]
    fn test_bind_conflict() {
        let mut system_under_test = make_system_under_test();
        system_under_test.bind_uniform_block("StaticWorldBufferSpheres", BindingSlot(1)).unwrap();

        let actual = system_under_test.bind_uniform_block("currentSizeSpheres", BindingSlot(1));

        assert_eq!(actual, Err(ShaderInterfaceError::BindingConflict {
            group: STATIC_BUFFERS_BIND_GROUP,
            slot: BindingSlot(1),
            occupant: "StaticWorldBufferSpheres".to_string(),
        }));
    }
}
