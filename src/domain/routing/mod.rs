pub mod route_lookup;
