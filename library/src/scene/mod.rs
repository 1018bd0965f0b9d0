pub mod scene_assembler;
pub mod scene_description;
pub mod simulation;
