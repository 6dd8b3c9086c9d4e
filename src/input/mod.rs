pub(crate) mod pointer;
