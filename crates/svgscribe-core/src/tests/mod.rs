mod compression;
mod tree;
