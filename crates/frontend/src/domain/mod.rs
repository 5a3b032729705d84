pub mod a001_commodity;
