mod events;
mod helpers;
mod subscribe;
