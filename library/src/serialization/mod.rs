pub mod pod_vector;
pub mod uniform_block_element;
