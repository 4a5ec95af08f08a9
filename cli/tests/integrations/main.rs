mod compile;
mod validate;
