pub mod serializers;
