mod activities;
mod captures;
mod media;
mod periods;
