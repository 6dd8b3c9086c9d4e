pub(crate) mod displacement;
