pub mod share_write;
