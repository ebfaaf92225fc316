pub mod lsp;
pub mod tags;
