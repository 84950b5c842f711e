mod role;
mod user;
