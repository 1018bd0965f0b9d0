pub mod alias;
